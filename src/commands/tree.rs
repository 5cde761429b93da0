//! Tree command implementation

use std::io::{self, IsTerminal, Write};

use crate::cli::TreeArgs;
use crate::config::RenderConfig;
use crate::error::{ArborError, Result};
use crate::render::{GlyphStyle, RenderOptions, RenderStats, TreeRenderer};

/// Run the tree command
pub fn run(args: TreeArgs, config: &RenderConfig) -> Result<()> {
    let options = build_options(&args, config, io::stdout().is_terminal());

    tracing::info!(path = %args.path.display(), "Rendering tree");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stats = TreeRenderer::new(options).render(&args.path, &mut out)?;

    tracing::debug!(?stats, "Render complete");

    if args.summary {
        writeln!(out, "\n{}", format_summary(&stats)).map_err(|source| ArborError::Io {
            path: args.path.clone(),
            source,
        })?;
    }

    Ok(())
}

/// Merge command line flags over the config section.
pub fn build_options(args: &TreeArgs, config: &RenderConfig, is_terminal: bool) -> RenderOptions {
    let style = if args.ascii {
        GlyphStyle::Ascii
    } else {
        config.style
    };
    let color = args.color.unwrap_or(config.color);

    RenderOptions::new()
        .with_glyphs(config.glyphs_for(style))
        .with_color(color.enabled(is_terminal))
        .with_sort(config.sort && !args.no_sort)
        .with_follow_symlinks(config.follow_symlinks || args.follow_symlinks)
}

/// "N directories, M files"
pub fn format_summary(stats: &RenderStats) -> String {
    format!(
        "{} director{}, {} file{}",
        stats.directories,
        if stats.directories == 1 { "y" } else { "ies" },
        stats.files,
        if stats.files == 1 { "" } else { "s" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use crate::config::ColorMode;
    use crate::render::GlyphSet;
    use clap::Parser;

    fn tree_args(argv: &[&str]) -> TreeArgs {
        let mut full = vec!["arborescence", "tree"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Command::Tree(args) => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_format_summary_pluralization() {
        let one = RenderStats {
            directories: 1,
            files: 1,
        };
        assert_eq!(format_summary(&one), "1 directory, 1 file");

        let many = RenderStats {
            directories: 0,
            files: 3,
        };
        assert_eq!(format_summary(&many), "0 directories, 3 files");
    }

    #[test]
    fn test_defaults_follow_config() {
        let config = RenderConfig::default();
        let options = build_options(&tree_args(&[]), &config, false);

        assert_eq!(options.glyphs, GlyphSet::unicode());
        assert!(!options.use_color);
        assert!(options.sort);
        assert!(!options.follow_symlinks);
    }

    #[test]
    fn test_auto_color_on_terminal() {
        let config = RenderConfig::default();
        let options = build_options(&tree_args(&[]), &config, true);
        assert!(options.use_color);
    }

    #[test]
    fn test_flags_override_config() {
        let config = RenderConfig {
            color: ColorMode::Always,
            ..Default::default()
        };
        let args = tree_args(&["--ascii", "--color", "never", "--no-sort", "-L"]);
        let options = build_options(&args, &config, true);

        assert_eq!(options.glyphs, GlyphSet::ascii());
        assert!(!options.use_color);
        assert!(!options.sort);
        assert!(options.follow_symlinks);
    }

    #[test]
    fn test_ascii_flag_keeps_config_overrides() {
        let config = RenderConfig {
            folder_icon: Some(String::new()),
            ..Default::default()
        };
        let options = build_options(&tree_args(&["--ascii"]), &config, false);

        assert_eq!(options.glyphs.folder_icon, "");
        assert_eq!(options.glyphs.branch, "|-- ");
    }
}
