use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::render::{GlyphSet, GlyphStyle, RenderOptions};
use crate::transfer::TransferOptions;

/// File name looked up under the user's config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderConfig,
    pub transfer: TransferConfig,
}

/// When to emit ANSI colour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Colour when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against whether the output is a terminal.
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorMode::Auto => is_terminal,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Glyph preset: unicode, ascii
    pub style: GlyphStyle,
    /// Colour mode: auto, always, never
    pub color: ColorMode,
    /// Sort entries by name
    pub sort: bool,
    /// Follow symbolic links
    pub follow_symlinks: bool,
    /// Per-glyph overrides of the preset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Replace existing files in the target
    pub overwrite: bool,
    /// Create a missing target directory
    pub create_target: bool,
    /// Parallel copy threads (0 = auto)
    pub jobs: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            style: GlyphStyle::Unicode,
            color: ColorMode::Auto,
            sort: true,
            follow_symlinks: false,
            indent_unit: None,
            start: None,
            branch: None,
            terminal: None,
            folder_icon: None,
        }
    }
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            overwrite: true,
            create_target: false,
            jobs: 0,
        }
    }
}

impl RenderConfig {
    /// The preset for `style` with any overrides applied.
    pub fn glyphs_for(&self, style: GlyphStyle) -> GlyphSet {
        let mut glyphs = style.glyphs();
        let overrides = [
            (&mut glyphs.indent_unit, &self.indent_unit),
            (&mut glyphs.start, &self.start),
            (&mut glyphs.branch, &self.branch),
            (&mut glyphs.terminal, &self.terminal),
            (&mut glyphs.folder_icon, &self.folder_icon),
        ];
        for (slot, value) in overrides {
            if let Some(value) = value {
                *slot = value.clone();
            }
        }
        glyphs
    }

    pub fn glyphs(&self) -> GlyphSet {
        self.glyphs_for(self.style)
    }

    /// Render options from this section; colour stays off until resolved by the caller.
    pub fn to_options(&self) -> RenderOptions {
        RenderOptions::new()
            .with_glyphs(self.glyphs())
            .with_sort(self.sort)
            .with_follow_symlinks(self.follow_symlinks)
    }
}

impl TransferConfig {
    pub fn to_options(&self) -> TransferOptions {
        TransferOptions::new()
            .with_overwrite(self.overwrite)
            .with_create_target(self.create_target)
            .with_jobs(self.jobs)
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// when present, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.is_file() => p,
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ParseError {
                path: path.clone(),
                source,
            })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// `<config dir>/arborescence/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(env!("CARGO_PKG_NAME")).join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.render
            .glyphs()
            .validate()
            .map_err(ConfigError::Invalid)
    }
}
