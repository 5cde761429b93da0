use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crossterm::style::{style, Stylize};
use serde::Serialize;

use crate::error::{ArborError, Result};
use crate::names::compare_names;

use super::options::RenderOptions;
use super::path::normalize_root;

/// Binary classification of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// Counts of what a render wrote, one line per entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    pub directories: u64,
    pub files: u64,
}

impl RenderStats {
    /// Total number of lines written
    pub fn lines(&self) -> u64 {
        self.directories + self.files
    }
}

#[derive(Debug)]
struct ListedEntry {
    path: PathBuf,
    name: String,
    kind: EntryKind,
}

/// Depth-first directory tree renderer.
///
/// Each directory's subdirectories are rendered first, each one followed by
/// its complete subtree, then the directory's files. Output goes to any
/// [`Write`] sink, line by line, as the traversal proceeds; lines already
/// written stay written if a later listing fails.
#[derive(Debug, Clone, Default)]
pub struct TreeRenderer {
    options: RenderOptions,
}

impl TreeRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render the tree rooted at `root` into `out`.
    pub fn render<W: Write>(&self, root: impl AsRef<Path>, out: &mut W) -> Result<RenderStats> {
        let root = normalize_root(root.as_ref())?;

        let mut traversal = Traversal {
            options: &self.options,
            out,
            stats: RenderStats::default(),
            visited: HashSet::new(),
        };

        if self.options.follow_symlinks {
            let canonical = fs::canonicalize(&root).map_err(|e| ArborError::from_io(&root, e))?;
            traversal.visited.insert(canonical);
        }

        tracing::debug!(root = %root.display(), "Rendering tree");
        traversal.visit(&root, 0)?;
        Ok(traversal.stats)
    }
}

/// Render the tree rooted at `root` into a string.
pub fn render_to_string(root: impl AsRef<Path>, options: &RenderOptions) -> Result<String> {
    let mut buf = Vec::new();
    TreeRenderer::new(options.clone()).render(root, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Render the tree rooted at `root` as a list of lines without terminators.
pub fn render_lines(root: impl AsRef<Path>, options: &RenderOptions) -> Result<Vec<String>> {
    Ok(render_to_string(root, options)?
        .lines()
        .map(str::to_string)
        .collect())
}

struct Traversal<'a, W> {
    options: &'a RenderOptions,
    out: &'a mut W,
    stats: RenderStats,
    /// Canonical directories already descended into; only used when following symlinks
    visited: HashSet<PathBuf>,
}

impl<W: Write> Traversal<'_, W> {
    fn visit(&mut self, dir: &Path, depth: usize) -> Result<()> {
        let entries = self.list(dir)?;
        tracing::trace!(path = %dir.display(), depth, count = entries.len(), "Listed directory");

        let (dirs, files): (Vec<_>, Vec<_>) = entries
            .into_iter()
            .partition(|e| e.kind == EntryKind::Directory);

        for (i, entry) in dirs.iter().enumerate() {
            let glyphs = &self.options.glyphs;
            let marker = if depth == 0 && i == 0 {
                glyphs.start.clone()
            } else {
                glyphs.branch.clone()
            };
            self.write_line(depth, &marker, entry)?;
            self.stats.directories += 1;

            if self.should_descend(&entry.path)? {
                self.visit(&entry.path, depth + 1)?;
            }
        }

        let last = files.len().saturating_sub(1);
        for (i, entry) in files.iter().enumerate() {
            let glyphs = &self.options.glyphs;
            let marker = if i == last {
                glyphs.terminal.clone()
            } else {
                glyphs.branch.clone()
            };
            self.write_line(depth, &marker, entry)?;
            self.stats.files += 1;
        }

        Ok(())
    }

    fn list(&self, dir: &Path) -> Result<Vec<ListedEntry>> {
        let read_dir = fs::read_dir(dir).map_err(|e| ArborError::from_io(dir, e))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| ArborError::from_io(dir, e))?;
            let path = entry.path();

            let metadata = if self.options.follow_symlinks {
                fs::metadata(&path)
            } else {
                fs::symlink_metadata(&path)
            }
            .map_err(|e| ArborError::from_io(&path, e))?;

            let kind = if metadata.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };

            entries.push(ListedEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                kind,
            });
        }

        if self.options.sort {
            entries.sort_by(|a, b| compare_names(&a.name, &b.name));
        }

        Ok(entries)
    }

    fn should_descend(&mut self, dir: &Path) -> Result<bool> {
        if !self.options.follow_symlinks {
            return Ok(true);
        }

        let canonical = fs::canonicalize(dir).map_err(|e| ArborError::from_io(dir, e))?;
        if self.visited.insert(canonical) {
            Ok(true)
        } else {
            tracing::warn!(path = %dir.display(), "Directory already visited, not descending");
            Ok(false)
        }
    }

    fn write_line(&mut self, depth: usize, marker: &str, entry: &ListedEntry) -> Result<()> {
        let glyphs = &self.options.glyphs;
        let indent = glyphs.indent(depth);
        let icon = match entry.kind {
            EntryKind::Directory => glyphs.folder_icon.as_str(),
            EntryKind::File => "",
        };

        let written = if self.options.use_color {
            let name = match entry.kind {
                EntryKind::Directory => style(entry.name.as_str()).blue().bold(),
                EntryKind::File => style(entry.name.as_str()),
            };
            writeln!(
                self.out,
                "{}{}{}{}",
                style(indent).dark_grey(),
                style(marker).dark_grey(),
                icon,
                name
            )
        } else {
            writeln!(self.out, "{}{}{}{}", indent, marker, icon, entry.name)
        };

        written.map_err(|source| ArborError::Io {
            path: entry.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::GlyphStyle;
    use tempfile::TempDir;

    fn ascii() -> RenderOptions {
        RenderOptions::new().with_style(GlyphStyle::Ascii)
    }

    #[test]
    fn test_empty_directory_renders_nothing() {
        let tmp = TempDir::new().unwrap();
        let mut out = Vec::new();

        let stats = TreeRenderer::default().render(tmp.path(), &mut out).unwrap();

        assert!(out.is_empty());
        assert_eq!(stats, RenderStats::default());
    }

    #[test]
    fn test_single_file_uses_terminal_glyph() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("only.txt"), "x").unwrap();

        let lines = render_lines(tmp.path(), &ascii()).unwrap();
        assert_eq!(lines, vec!["\\-- only.txt"]);
    }

    #[test]
    fn test_first_root_directory_uses_start_glyph() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("a/inner")).unwrap();
        fs::create_dir(tmp.path().join("b")).unwrap();

        let lines = render_lines(tmp.path(), &ascii()).unwrap();
        assert_eq!(lines, vec!["+-- [+] a", "|   |-- [+] inner", "|-- [+] b"]);
    }

    #[test]
    fn test_stats_count_every_entry() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("src/nested")).unwrap();
        fs::write(tmp.path().join("src/lib.rs"), "").unwrap();
        fs::write(tmp.path().join("src/nested/mod.rs"), "").unwrap();
        fs::write(tmp.path().join("Cargo.toml"), "").unwrap();

        let mut out = Vec::new();
        let stats = TreeRenderer::new(ascii()).render(tmp.path(), &mut out).unwrap();

        assert_eq!(stats.directories, 2);
        assert_eq!(stats.files, 3);
        assert_eq!(stats.lines(), 5);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 5);
    }

    #[test]
    fn test_unsorted_render_keeps_every_entry() {
        let tmp = TempDir::new().unwrap();
        for name in ["c", "a", "b"] {
            fs::write(tmp.path().join(name), "").unwrap();
        }

        let lines = render_lines(tmp.path(), &ascii().with_sort(false)).unwrap();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("\\-- "));
        assert!(lines[..2].iter().all(|l| l.starts_with("|-- ")));
    }

    #[test]
    fn test_trailing_separator_renders_same_tree() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("bin")).unwrap();
        fs::write(tmp.path().join("bin/index.js"), "").unwrap();

        let plain = render_to_string(tmp.path(), &ascii()).unwrap();
        let with_slash = format!("{}/", tmp.path().display());
        let trailing = render_to_string(&with_slash, &ascii()).unwrap();

        assert_eq!(plain, trailing);
    }

    #[test]
    fn test_missing_root_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing");
        let mut out = Vec::new();

        let err = TreeRenderer::default().render(&missing, &mut out).unwrap_err();

        assert!(matches!(err, ArborError::PathNotFound(p) if p == missing));
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_root_is_invalid_argument() {
        let mut out = Vec::new();
        let err = TreeRenderer::default().render("", &mut out).unwrap_err();
        assert!(matches!(err, ArborError::InvalidArgument(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_color_keeps_visible_text() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("src")).unwrap();
        fs::write(tmp.path().join("src/main.rs"), "").unwrap();

        let plain = render_to_string(tmp.path(), &ascii()).unwrap();
        let colored = render_to_string(tmp.path(), &ascii().with_color(true)).unwrap();

        assert_ne!(plain, colored);
        assert!(colored.contains('\u{1b}'));
        assert!(colored.contains("src"));
        assert!(colored.contains("main.rs"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_not_followed_is_a_file() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("real")).unwrap();
        fs::write(tmp.path().join("real/data"), "").unwrap();
        std::os::unix::fs::symlink(tmp.path().join("real"), tmp.path().join("link")).unwrap();

        let lines = render_lines(tmp.path(), &ascii()).unwrap();
        assert_eq!(lines, vec!["+-- [+] real", "|   \\-- data", "\\-- link"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_is_rendered_once() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("a")).unwrap();
        std::os::unix::fs::symlink(tmp.path(), tmp.path().join("a/loop")).unwrap();

        let options = ascii().with_follow_symlinks(true);
        let lines = render_lines(tmp.path(), &options).unwrap();

        assert_eq!(lines, vec!["+-- [+] a", "|   |-- [+] loop"]);
    }
}
