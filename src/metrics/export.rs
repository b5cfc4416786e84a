//! CSV Export
//!
//! Writes the header and accumulated rows. Every write replaces the whole
//! file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use csv::{Terminator, WriterBuilder};
use log::info;

use super::row::{MetricsRow, CSV_HEADER};
use crate::error::{MetricsError, Result};

/// Writes the header and `rows` to any writer.
///
/// Fields containing commas or quotes are quoted.
pub fn write_rows<W: Write>(writer: W, rows: &[MetricsRow]) -> csv::Result<()> {
    let mut csv_writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;
    for row in rows {
        csv_writer.write_record(row.to_record())?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Truncates `path` and writes the header followed by `rows`.
///
/// # Errors
///
/// * `MetricsError::Io` - The file could not be created or written
/// * `MetricsError::Csv` - A record could not be encoded
pub fn write_csv(path: &Path, rows: &[MetricsRow]) -> Result<()> {
    let file = File::create(path).map_err(|source| MetricsError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    write_rows(file, rows).map_err(|source| classify_csv_error(path, source))?;

    info!("Wrote {} metrics rows to {}", rows.len(), path.display());
    Ok(())
}

/// Splits write failures on the underlying file from encoding failures.
fn classify_csv_error(path: &Path, source: csv::Error) -> MetricsError {
    if source.is_io_error() {
        let source = match source.into_kind() {
            csv::ErrorKind::Io(err) => err,
            other => io::Error::new(io::ErrorKind::Other, format!("{:?}", other)),
        };
        return MetricsError::Io {
            path: path.to_path_buf(),
            source,
        };
    }

    MetricsError::Csv {
        path: path.to_path_buf(),
        source,
    }
}
