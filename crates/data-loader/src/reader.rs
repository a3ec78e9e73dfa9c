//! Line reading for catalog files.
//!
//! Reads a whole file up front, strips a leading UTF-8 byte-order mark,
//! drops blank and whitespace-only lines, and yields the survivors with
//! their physical 1-based line numbers. Mixed line terminators are
//! tolerated (`str::lines` handles both `\n` and `\r\n`).

use crate::error::{LoadError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// One non-blank input line with its physical 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub number: usize,
    pub text: String,
}

/// Read the non-blank lines of a file.
///
/// Fails with [`LoadError::FileNotFound`] for a missing path,
/// [`LoadError::FileEmpty`] when every line is blank, and
/// [`LoadError::Io`] for anything else the filesystem reports.
pub fn read_lines(path: &Path) -> Result<Vec<RawLine>> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => LoadError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let lines: Vec<RawLine> = content
        .lines()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(idx, text)| RawLine {
            number: idx + 1,
            text: text.to_string(),
        })
        .collect();

    if lines.is_empty() {
        return Err(LoadError::FileEmpty {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(path = %path.display(), lines = lines.len(), "read input file");
    Ok(lines)
}
