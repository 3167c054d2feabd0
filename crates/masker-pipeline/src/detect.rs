//! Input file type detection

use masker_core::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Bytes inspected when the extension doesn't decide the type
pub const SNIFF_LEN: usize = 8 * 1024;

/// Lines looked at when sniffing for CSV
const SNIFF_LINES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Csv,
    Text,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Csv => "csv",
            FileType::Text => "text",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(FileType::Csv),
            "text" | "txt" => Ok(FileType::Text),
            other => Err(Error::config(format!(
                "Invalid file type: {} (expected csv or text)",
                other
            ))),
        }
    }
}

/// Detect the type of `path` from its extension, falling back to `sample`
/// (the first bytes of the file) when there is no extension.
pub fn detect(path: &Path, sample: &[u8]) -> Result<FileType> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") | Some("tsv") => Ok(FileType::Csv),
        Some("txt") | Some("text") | Some("log") | Some("md") => Ok(FileType::Text),
        Some(other) => Err(Error::UnsupportedFileType(format!(
            "{} (unknown extension .{}; use --file_type to override)",
            path.display(),
            other
        ))),
        None => sniff(sample).ok_or_else(|| {
            Error::UnsupportedFileType(format!("{} (binary content)", path.display()))
        }),
    }
}

/// Delimiter implied by the file name
pub fn default_delimiter(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    }
}

/// Classify content. `None` means it doesn't look like text at all.
fn sniff(sample: &[u8]) -> Option<FileType> {
    if sample.contains(&0) {
        return None;
    }

    let text = match std::str::from_utf8(sample) {
        Ok(text) => text,
        // A multi-byte character cut off by the sample boundary is fine
        Err(e) if e.error_len().is_none() => sample_prefix(sample, e.valid_up_to()),
        Err(_) => return None,
    };

    let mut lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if sample.len() >= SNIFF_LEN && !text.ends_with('\n') {
        // Last line is probably truncated
        lines.pop();
    }
    lines.truncate(SNIFF_LINES);

    let commas: Vec<usize> = lines.iter().map(|l| l.matches(',').count()).collect();
    let looks_delimited =
        commas.len() >= 2 && commas[0] > 0 && commas.iter().all(|&c| c == commas[0]);

    Some(if looks_delimited {
        FileType::Csv
    } else {
        FileType::Text
    })
}

fn sample_prefix(sample: &[u8], valid_up_to: usize) -> &str {
    // valid_up_to is a UTF-8 boundary by definition
    std::str::from_utf8(&sample[..valid_up_to]).unwrap_or_default()
}
