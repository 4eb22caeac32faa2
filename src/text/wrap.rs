use crate::scene::model::{HorizontalAlign, TextLayer};

/// One output line of [`wrap_and_measure`].
#[derive(Clone, Debug, PartialEq)]
pub struct WrappedLine {
    /// Line text without trailing separators.
    pub text: String,
    /// Zero-based index of the source paragraph.
    pub paragraph: usize,
}

/// A line with its vertical position.
#[derive(Clone, Debug, PartialEq)]
pub struct LinePlacement {
    /// Line text.
    pub text: String,
    /// Baseline `y` (or middle `y`, depending on the layer's baseline mode).
    pub baseline_y: f64,
}

/// Greedy word wrap.
///
/// Paragraphs split on `'\n'`, words on single spaces. A word that does not fit starts a new line
/// unless the current line is empty; a lone word wider than `max_width_px` overflows. Empty
/// paragraphs produce no line.
pub fn wrap_and_measure(
    text: &str,
    max_width_px: f64,
    mut measure: impl FnMut(&str) -> f64,
) -> Vec<WrappedLine> {
    let mut out = Vec::new();

    for (paragraph, para) in text.split('\n').enumerate() {
        let mut line = String::new();
        for word in para.split(' ') {
            let candidate = if line.is_empty() {
                word.to_owned()
            } else {
                format!("{line} {word}")
            };

            if measure(&candidate) > max_width_px && !line.is_empty() {
                out.push(WrappedLine {
                    text: std::mem::replace(&mut line, word.to_owned()),
                    paragraph,
                });
            } else {
                line = candidate;
            }
        }

        if !line.is_empty() {
            out.push(WrappedLine {
                text: line,
                paragraph,
            });
        }
    }

    out
}

/// Stack wrapped lines from `start_y`: `L` between lines, `1.5 L` across a paragraph boundary.
pub fn layout_vertical(lines: &[WrappedLine], start_y: f64, line_height_px: f64) -> Vec<LinePlacement> {
    lines
        .iter()
        .enumerate()
        .map(|(idx, line)| LinePlacement {
            text: line.text.clone(),
            baseline_y: start_y
                + idx as f64 * line_height_px
                + line.paragraph as f64 * 0.5 * line_height_px,
        })
        .collect()
}

/// Unwrapped layout: one line per `'\n'`-separated segment, `spacing` apart.
pub fn simple_lines(content: &str, anchor_y: f64, spacing: f64) -> Vec<LinePlacement> {
    content
        .split('\n')
        .enumerate()
        .map(|(i, text)| LinePlacement {
            text: text.to_owned(),
            baseline_y: anchor_y + i as f64 * spacing,
        })
        .collect()
}

/// Left edge of a line of `width` pixels aligned against `anchor_x`.
pub fn aligned_origin_x(anchor_x: f64, width: f64, align: HorizontalAlign) -> f64 {
    match align {
        HorizontalAlign::Left => anchor_x,
        HorizontalAlign::Center => anchor_x - width / 2.0,
        HorizontalAlign::Right => anchor_x - width,
    }
}

/// A line of a text layer with its final horizontal origin.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedLine {
    /// Line text.
    pub text: String,
    /// Left edge after alignment.
    pub origin_x: f64,
    /// Anchor-space `y`: the baseline, or the line middle for [`TextBaseline::Middle`].
    ///
    /// [`TextBaseline::Middle`]: crate::scene::model::TextBaseline::Middle
    pub baseline_y: f64,
    /// Measured width.
    pub width: f64,
}

/// Lay out every line of `layer` using `measure` for widths.
///
/// Layers with `max_width_px` wrap and use paragraph gaps; others break only on `'\n'`. Blank
/// content yields no lines.
pub fn plan_text_layer(layer: &TextLayer, mut measure: impl FnMut(&str) -> f64) -> Vec<PlannedLine> {
    if layer.is_blank() {
        return Vec::new();
    }

    let spacing = layer.line_spacing_px();
    let placements = match layer.max_width_px.filter(|w| w.is_finite() && *w > 0.0) {
        Some(max_width) => {
            let lines = wrap_and_measure(&layer.content, max_width, &mut measure);
            layout_vertical(&lines, layer.anchor.y, spacing)
        }
        None => simple_lines(&layer.content, layer.anchor.y, spacing),
    };

    placements
        .into_iter()
        .map(|p| {
            let width = if p.text.is_empty() { 0.0 } else { measure(&p.text) };
            PlannedLine {
                origin_x: aligned_origin_x(layer.anchor.x, width, layer.align),
                baseline_y: p.baseline_y,
                width,
                text: p.text,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
