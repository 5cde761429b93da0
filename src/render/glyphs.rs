use serde::{Deserialize, Serialize};

/// Width, in characters, every indent unit must have.
pub const INDENT_WIDTH: usize = 4;

/// Preset selector for the glyphs used to draw a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphStyle {
    /// Box-drawing characters and a folder icon
    #[default]
    Unicode,
    /// Portable `+--`, `|--`, `\--` markers
    Ascii,
}

impl GlyphStyle {
    pub fn glyphs(self) -> GlyphSet {
        match self {
            GlyphStyle::Unicode => GlyphSet::unicode(),
            GlyphStyle::Ascii => GlyphSet::ascii(),
        }
    }
}

/// The characters a tree is drawn with.
///
/// Passed into the renderer explicitly; there is no process-wide theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSet {
    /// Prefix repeated once per depth level
    pub indent_unit: String,
    /// Marker of the very first directory at the root level
    pub start: String,
    /// Marker of every other directory and of non-final files
    pub branch: String,
    /// Marker of the last file in a directory
    pub terminal: String,
    /// Placed between the marker and a directory name
    pub folder_icon: String,
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self::unicode()
    }
}

impl GlyphSet {
    pub fn unicode() -> Self {
        Self {
            indent_unit: "│   ".to_string(),
            start: "┌── ".to_string(),
            branch: "├── ".to_string(),
            terminal: "└── ".to_string(),
            folder_icon: "📁 ".to_string(),
        }
    }

    pub fn ascii() -> Self {
        Self {
            indent_unit: "|   ".to_string(),
            start: "+-- ".to_string(),
            branch: "|-- ".to_string(),
            terminal: "\\-- ".to_string(),
            folder_icon: "[+] ".to_string(),
        }
    }

    /// Check the invariants the renderer relies on.
    ///
    /// Returns a description of the first violation found.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let width = self.indent_unit.chars().count();
        if width != INDENT_WIDTH {
            return Err(format!(
                "indent_unit must be {} characters wide, got {} ({:?})",
                INDENT_WIDTH, width, self.indent_unit
            ));
        }

        for (name, glyph) in [
            ("start", &self.start),
            ("branch", &self.branch),
            ("terminal", &self.terminal),
        ] {
            if glyph.is_empty() {
                return Err(format!("{} glyph must not be empty", name));
            }
        }

        Ok(())
    }

    /// Indentation for an entry at `depth`.
    pub fn indent(&self, depth: usize) -> String {
        self.indent_unit.repeat(depth)
    }
}
