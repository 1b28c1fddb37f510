//! The source loader / preprocessor.
//!
//! Reads a file (or an in-memory buffer), normalizes line endings, splices
//! backslash-continued lines, and expands `#include` directives up to a
//! fixed nesting depth.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::element::SourceLocation;
use crate::error::{LoaderError, MathTextError};

/// Maximum `#include` nesting depth before loading aborts.
pub const MAX_INCLUDE_DEPTH: u32 = 5;

/// One logical (post-continuation, post-include) source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub location: SourceLocation,
    pub text: String,
}

/// Load a MathText source file from disk, following `#include` directives.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<Vec<SourceLine>, MathTextError> {
    load_depth(path.as_ref(), 0)
}

/// Load a MathText source document from an in-memory buffer, as if it came
/// from `filename`. Used for tests and for piping stdin-sourced input; a
/// read failure part-way through an in-memory buffer cannot happen, so this
/// never produces an error.
pub fn load_from_buffer(buffer: &str, filename: &str) -> Vec<SourceLine> {
    let mut lines = Vec::new();
    ingest(filename, buffer, 0, &mut lines).expect("ingest of an in-memory buffer cannot fail");
    lines
}

fn load_depth(path: &Path, depth: u32) -> Result<Vec<SourceLine>, MathTextError> {
    let filename = path.to_string_lossy().into_owned();
    trace!(%filename, depth, "loading source file");

    let raw = fs::read(path).map_err(|source| LoaderError::Open { path: path.to_path_buf(), source })?;
    let contents = String::from_utf8_lossy(&raw).into_owned();
    // Tolerate CRLF by simply discarding every \r; we never care about it.
    let contents: String = contents.chars().filter(|&c| c != '\r').collect();

    let mut lines = Vec::new();
    ingest(&filename, &contents, depth, &mut lines)?;
    Ok(lines)
}

/// Split `buffer` into logical lines, splicing continuations and expanding
/// `#include`s, appending the result to `out`.
fn ingest(filename: &str, buffer: &str, depth: u32, out: &mut Vec<SourceLine>) -> Result<(), MathTextError> {
    let mut pending: Option<String> = None;
    let mut continuation_start: Option<u32> = None;

    for (idx, raw_line) in buffer.split('\n').enumerate() {
        let line_number = idx as u32 + 1;
        // Trim trailing whitespace only; leading whitespace may be
        // meaningful (e.g. inside a verbatim text block).
        let trimmed_end = raw_line.trim_end();

        if let Some(stripped) = trimmed_end.strip_suffix('\\') {
            if continuation_start.is_none() {
                continuation_start = Some(line_number);
            }
            let mut acc = pending.take().unwrap_or_default();
            acc.push_str(stripped);
            pending = Some(acc);
            continue;
        }

        let mut acc = pending.take().unwrap_or_default();
        acc.push_str(trimmed_end);

        let start_line = continuation_start.take().unwrap_or(line_number);

        if let Some(include_path) = acc.strip_prefix("#include ") {
            let include_path = include_path.trim();
            if depth + 1 >= MAX_INCLUDE_DEPTH {
                let err: MathTextError =
                    LoaderError::IncludeTooDeep { path: PathBuf::from(include_path), line: start_line }.into();
                return Err(err.included_by(filename, start_line));
            }
            match load_depth(Path::new(include_path), depth + 1) {
                Ok(mut included) => out.append(&mut included),
                Err(err) => return Err(err.included_by(filename, start_line)),
            }
            continue;
        }

        out.push(SourceLine { location: SourceLocation::new(filename, start_line, line_number), text: acc });
    }

    Ok(())
}

/// Derive a default output path by swapping in `extension`, used by the CLI
/// when `--braille`/`--latex` are given without an explicit path.
pub fn default_output_path(input: &Path, extension: &str) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let mut out = input.with_file_name(stem);
    out.set_extension(extension);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splices_continuation_lines() {
        let buf = "first\\\nsecond\nthird";
        let lines = load_from_buffer(buf, "(memory)");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "firstsecond");
        assert_eq!(lines[0].location.line1, 1);
        assert_eq!(lines[0].location.line2, 2);
        assert_eq!(lines[1].text, "third");
    }

    #[test]
    fn trims_trailing_whitespace_only() {
        let buf = "  leading kept   \ntrailing";
        let lines = load_from_buffer(buf, "(memory)");
        assert_eq!(lines[0].text, "  leading kept");
    }

    #[test]
    fn default_output_path_swaps_extension() {
        let out = default_output_path(Path::new("notes.mt"), "brf");
        assert_eq!(out, Path::new("notes.brf"));
    }

    #[test]
    fn default_output_path_keeps_directory() {
        let out = default_output_path(Path::new("/tmp/src/notes.mt"), "tex");
        assert_eq!(out, Path::new("/tmp/src/notes.tex"));
    }
}
