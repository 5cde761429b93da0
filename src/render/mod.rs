//! Directory tree rendering

mod glyphs;
mod options;
mod path;
mod walker;

pub use glyphs::{GlyphSet, GlyphStyle, INDENT_WIDTH};
pub use options::RenderOptions;
pub use path::normalize_root;
pub use walker::{render_lines, render_to_string, EntryKind, RenderStats, TreeRenderer};
