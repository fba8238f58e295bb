//! Interactive image selection from a terminal prompt

use crate::io::configuration::SUPPORTED_EXTENSIONS;
use crate::io::error::{AnalysisError, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Heading printed before the path prompt
pub const PROMPT_TITLE: &str = "Select an Eye Image";

/// Ask for an image path and read one line of input
///
/// Returns `Ok(None)` when input ends or the line is blank, which stands for
/// a dismissed selection.
///
/// # Errors
///
/// Returns an error if the prompt cannot be written or input cannot be read
pub fn prompt_for_image<R, W>(input: &mut R, prompt: &mut W) -> Result<Option<PathBuf>>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    let patterns = SUPPORTED_EXTENSIONS.map(|ext| format!("*.{ext}")).join(" ");
    write!(prompt, "{PROMPT_TITLE} ({patterns}): ")
        .and_then(|()| prompt.flush())
        .map_err(|e| terminal_error("write prompt", e))?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| terminal_error("read selection", e))?;

    if read == 0 {
        return Ok(None);
    }
    Ok(parse_selection(&line))
}

/// Interpret a line of prompt input as a path
///
/// Surrounding whitespace and one pair of matching quotes (as added by
/// terminals on drag-and-drop) are removed. Blank input means no selection.
pub fn parse_selection(line: &str) -> Option<PathBuf> {
    let trimmed = line.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|&quote| {
            trimmed
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        })
        .unwrap_or(trimmed)
        .trim();

    (!unquoted.is_empty()).then(|| PathBuf::from(unquoted))
}

/// Whether `path` has one of the offered image extensions, ignoring case
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
}

fn terminal_error(operation: &'static str, source: std::io::Error) -> AnalysisError {
    AnalysisError::FileSystem {
        path: PathBuf::from("<terminal>"),
        operation,
        source,
    }
}
