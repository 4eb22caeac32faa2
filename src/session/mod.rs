//! Edit-and-rerender state for interactive use.

pub(crate) mod poster_session;
