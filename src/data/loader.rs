use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::layout::FieldLayout;
use super::model::DecodedRow;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("file '{}' not found", .path.display())]
    NotFound { path: PathBuf },

    #[error("reading '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' line {line}: not valid UTF-8", .path.display())]
    Encoding { path: PathBuf, line: usize },
}

impl DecodeError {
    /// Whether the input was simply absent, as opposed to unreadable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DecodeError::NotFound { .. })
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Decode a fixed-width file into one row per line.
pub fn decode_file(path: &Path, layout: &FieldLayout) -> Result<Vec<DecodedRow>, DecodeError> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    decode_reader(BufReader::new(file), layout, path)
}

/// Like [`decode_file`], but any failure is logged and turned into an empty
/// dataset so the rest of the pipeline still runs.
pub fn load_or_empty(path: &Path, layout: &FieldLayout) -> Vec<DecodedRow> {
    match decode_file(path, layout) {
        Ok(rows) => {
            log::info!("Decoded {} records from {}", rows.len(), path.display());
            rows
        }
        Err(e) if e.is_not_found() => {
            log::error!("Input file '{}' was not found", path.display());
            log::warn!("Continuing with an empty dataset");
            Vec::new()
        }
        Err(e) => {
            log::error!("Unexpected error while decoding microdata: {e}");
            log::warn!("Continuing with an empty dataset");
            Vec::new()
        }
    }
}

/// Decode records from any buffered reader.  `origin` is only used in errors.
pub fn decode_reader<R: BufRead>(
    mut reader: R,
    layout: &FieldLayout,
    origin: &Path,
) -> Result<Vec<DecodedRow>, DecodeError> {
    let mut rows = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf).map_err(|source| DecodeError::Io {
            path: origin.to_path_buf(),
            source,
        })?;
        if n == 0 {
            break;
        }
        let line_no = rows.len() + 1;
        let record = strip_line_ending(&buf);
        if std::str::from_utf8(record).is_err() {
            return Err(DecodeError::Encoding {
                path: origin.to_path_buf(),
                line: line_no,
            });
        }
        rows.push(decode_record(record, layout));
    }

    Ok(rows)
}

/// Slice one record at the layout's offsets.  Fields are not trimmed.
pub fn decode_record(record: &[u8], layout: &FieldLayout) -> DecodedRow {
    let fields: BTreeMap<&'static str, String> = layout
        .fields()
        .iter()
        .map(|spec| {
            let raw = String::from_utf8_lossy(spec.slice(record)).into_owned();
            (spec.name, raw)
        })
        .collect();
    DecodedRow { fields }
}

// -- helpers --

fn open_error(path: &Path, e: io::Error) -> DecodeError {
    if e.kind() == io::ErrorKind::NotFound {
        DecodeError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        DecodeError::Io {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
