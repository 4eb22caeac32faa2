use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use posterkit::{
    BACKGROUND_IMAGE_KEY, ColorDef, Compositor, CompositorOpts, FaceStyle, FontBook, FontWeight,
    ImageStore, PHOTO_IMAGE_KEY, Scene, TemplateKind,
};
use tracing_subscriber::EnvFilter;

const FALLBACK_FONT_ENV: &str = "POSTERKIT_FALLBACK_FONT";

#[derive(Parser, Debug)]
#[command(name = "posterkit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a scene or a built-in template to PNG.
    Render(RenderArgs),
    /// Write a built-in template as scene JSON.
    Template(TemplateArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long, required_unless_present = "template", conflicts_with = "template")]
    scene: Option<PathBuf>,

    /// Built-in template (`campaign`, `word-of-the-day`).
    #[arg(long)]
    template: Option<TemplateKind>,

    /// Word for the word-of-the-day template.
    #[arg(long, requires = "template")]
    word: Option<String>,

    /// Meaning for the word-of-the-day template.
    #[arg(long, requires = "template")]
    meaning: Option<String>,

    /// Example sentence for the word-of-the-day template.
    #[arg(long, requires = "template")]
    example: Option<String>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Background image (PNG or JPEG).
    #[arg(long)]
    background: Option<PathBuf>,

    /// Photo for the placeholder slot (PNG or JPEG).
    #[arg(long)]
    photo: Option<PathBuf>,

    /// Font face as `Family[:bold][:italic][:<weight>]=path`. Repeatable.
    #[arg(long = "font")]
    fonts: Vec<FontArg>,

    /// Family used when a text layer's own family has no registered face.
    #[arg(long)]
    fallback_font: Option<String>,

    /// CSS color painted under every layer.
    #[arg(long)]
    clear: Option<String>,
}

#[derive(Parser, Debug)]
struct TemplateArgs {
    /// Template name (`campaign`, `word-of-the-day`).
    kind: TemplateKind,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Debug)]
struct FontArg {
    family: String,
    style: FaceStyle,
    path: PathBuf,
}

impl std::str::FromStr for FontArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (face, path) = s
            .split_once('=')
            .ok_or_else(|| format!("expected Family[:bold][:italic]=path, got '{s}'"))?;
        let mut parts = face.split(':');
        let family = parts.next().unwrap_or_default().trim();
        if family.is_empty() || path.trim().is_empty() {
            return Err(format!("font '{s}' needs a family and a path"));
        }

        let mut style = FaceStyle::regular();
        for modifier in parts {
            match modifier.trim().to_ascii_lowercase().as_str() {
                "bold" => style.weight = FontWeight::BOLD,
                "italic" => style.italic = true,
                "regular" | "normal" => style.weight = FontWeight::NORMAL,
                other => {
                    let w: u16 = other
                        .parse()
                        .map_err(|_| format!("unknown font modifier '{other}'"))?;
                    style.weight = FontWeight::new(w);
                }
            }
        }

        Ok(Self {
            family: family.to_owned(),
            style,
            path: PathBuf::from(path.trim()),
        })
    }
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Template(args) => cmd_template(args),
    }
}

fn load_scene(args: &RenderArgs) -> anyhow::Result<Scene> {
    if let Some(path) = &args.scene {
        return Scene::from_path(path).with_context(|| format!("load scene '{}'", path.display()));
    }
    let kind = args
        .template
        .context("either --scene or --template is required")?;
    let scene = match kind {
        TemplateKind::WordOfTheDay => posterkit::word_of_the_day(
            args.word.as_deref().unwrap_or(posterkit::DEFAULT_WORD),
            args.meaning.as_deref().unwrap_or(posterkit::DEFAULT_MEANING),
            args.example.as_deref().unwrap_or(posterkit::DEFAULT_EXAMPLE),
        ),
        other => other.scene(),
    };
    Ok(scene)
}

fn load_image(images: &mut ImageStore, key: &str, path: &Path) -> anyhow::Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let image =
        posterkit::decode_image(&bytes).with_context(|| format!("decode '{}'", path.display()))?;
    images.insert(key, image);
    Ok(())
}

fn load_fonts(args: &RenderArgs) -> anyhow::Result<FontBook> {
    let mut book = FontBook::new();
    for font in &args.fonts {
        let bytes = std::fs::read(&font.path)
            .with_context(|| format!("read font '{}'", font.path.display()))?;
        book.register(font.family.clone(), font.style, bytes)
            .with_context(|| format!("register font '{}'", font.path.display()))?;
    }

    let fallback = args
        .fallback_font
        .clone()
        .or_else(|| std::env::var(FALLBACK_FONT_ENV).ok())
        .or_else(|| args.fonts.first().map(|f| f.family.clone()));
    if let Some(family) = fallback {
        book.set_fallback(family);
    }
    Ok(book)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut scene = load_scene(&args)?;

    let mut images = ImageStore::new();
    if let Some(path) = &args.background {
        load_image(&mut images, BACKGROUND_IMAGE_KEY, path)?;
        scene.background.image = Some(BACKGROUND_IMAGE_KEY.to_owned());
    }
    if let Some(path) = &args.photo {
        load_image(&mut images, PHOTO_IMAGE_KEY, path)?;
        match scene.photo.as_mut() {
            Some(photo) => photo.image = Some(PHOTO_IMAGE_KEY.to_owned()),
            None => tracing::warn!("scene has no photo slot; --photo ignored"),
        }
    }

    let mut opts = CompositorOpts::default();
    if let Some(css) = &args.clear {
        let c = ColorDef::parse(css)
            .with_context(|| format!("parse --clear '{css}'"))?
            .to_rgba8();
        opts = opts.with_clear_rgba(Some([c.r, c.g, c.b, c.a]));
    }

    let fonts = load_fonts(&args)?;
    if fonts.is_empty() && !scene.texts.is_empty() {
        tracing::warn!("no fonts registered; text layers will be skipped");
    }

    let mut compositor = Compositor::with_opts(fonts, opts);
    let surface = compositor.render(&scene, &images)?;
    posterkit::write_png(&surface, &args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_template(args: TemplateArgs) -> anyhow::Result<()> {
    let json = args.kind.scene().to_json_pretty()?;
    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, json).with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
