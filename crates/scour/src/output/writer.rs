//! Cleaned-table CSV export.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use crate::error::{Result, ScourError};
use crate::table::Table;

/// Write the table as a CSV file with a header row and no surrogate row
/// numbering. The data goes to a temporary sibling file first and is renamed
/// into place, so a failed write leaves no partial artifact.
pub fn write_csv(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| ScourError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let tmp = path.with_extension("csv.tmp");

    {
        let file = File::create(&tmp).map_err(|e| ScourError::Io {
            path: tmp.clone(),
            source: e,
        })?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(file));

        writer.write_record(table.names())?;

        for row in 0..table.row_count() {
            let record: Vec<String> = table
                .columns()
                .iter()
                .map(|col| col.cell_text(row))
                .collect();
            writer.write_record(&record)?;
        }

        writer.flush().map_err(|e| ScourError::Io {
            path: tmp.clone(),
            source: e,
        })?;
    }

    fs::rename(&tmp, path).map_err(|e| ScourError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
