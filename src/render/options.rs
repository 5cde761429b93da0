use super::glyphs::{GlyphSet, GlyphStyle};

/// Configuration options for rendering a directory tree.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Characters the tree is drawn with
    pub glyphs: GlyphSet,

    /// Emit ANSI colour for directory names and markers
    pub use_color: bool,

    /// Sort entries by name instead of keeping the filesystem listing order
    pub sort: bool,

    /// Classify symlinks by their target and descend into linked directories
    pub follow_symlinks: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            glyphs: GlyphSet::unicode(),
            use_color: false,
            sort: true,
            follow_symlinks: false,
        }
    }
}

impl RenderOptions {
    /// Create a new RenderOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the glyphs to draw with
    pub fn with_glyphs(mut self, glyphs: GlyphSet) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Use one of the glyph presets
    pub fn with_style(mut self, style: GlyphStyle) -> Self {
        self.glyphs = style.glyphs();
        self
    }

    /// Set whether to colour the output
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.use_color = enabled;
        self
    }

    /// Set whether to sort entries by name
    pub fn with_sort(mut self, enabled: bool) -> Self {
        self.sort = enabled;
        self
    }

    /// Set whether to follow symbolic links
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}
