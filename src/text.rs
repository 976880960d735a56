//! Text shaping for captions, status lines and word stamps.

/// Font files and their lookup fallbacks.
pub mod font;
/// Parley layout engine producing renderer-ready text.
pub mod layout;
