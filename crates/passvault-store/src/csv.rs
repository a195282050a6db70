//! Delimited flat-file helpers shared by the record tables.
//!
//! The on-disk format is deliberately plain: one header line, then one
//! comma-separated row per record, no quoting or escaping. A `,` inside
//! a field value corrupts that row's layout; this is a documented
//! limitation of the format, not something these helpers try to repair.
//!
//! Saving truncates and rewrites the whole file. The rewrite is not
//! crash-atomic: a crash mid-write can leave the file empty or partial.
//! That window is an accepted failure mode of the format.

use std::path::Path;

use crate::error::StoreResult;

/// Field delimiter for every record table.
pub(crate) const DELIMITER: char = ',';

/// Load all rows from `path`, skipping the header and blank lines.
///
/// Each remaining line is split on [`DELIMITER`] with fields trimmed;
/// lines with fewer than `min_fields` fields are silently dropped. If
/// the file does not exist it is created with just the header line and
/// an empty row set is returned.
pub(crate) fn load_rows(path: &Path, header: &str, min_fields: usize) -> StoreResult<Vec<Vec<String>>> {
    if !path.exists() {
        create_header_only(path, header)?;
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)?;

    let rows: Vec<Vec<String>> = content
        .lines()
        .skip(1) // header
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.split(DELIMITER)
                .map(|field| field.trim().to_string())
                .collect::<Vec<String>>()
        })
        .filter(|fields| fields.len() >= min_fields)
        .collect();

    Ok(rows)
}

/// Truncate `path` and rewrite it: header line first, then one line per
/// row with fields joined by [`DELIMITER`].
pub(crate) fn save_rows(path: &Path, header: &str, rows: &[Vec<String>]) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut out = String::with_capacity(header.len() + 1 + rows.len() * 32);
    out.push_str(header);
    out.push('\n');
    for fields in rows {
        out.push_str(&fields.join(&DELIMITER.to_string()));
        out.push('\n');
    }

    std::fs::write(path, out)?;
    Ok(())
}

/// Write a file containing only the header line, creating parents as
/// needed. Used for lazy creation of missing record tables.
pub(crate) fn create_header_only(path: &Path, header: &str) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, format!("{header}\n"))?;
    tracing::debug!(path = %path.display(), "created header-only record file");
    Ok(())
}
