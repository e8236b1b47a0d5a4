// src/file.rs

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;

use crate::config::consts::CSV_SEP;
use crate::config::options::ExportOptions;
use crate::csv::to_table_string;
use crate::data::{ProjectCollection, HEADERS};
use crate::error::ExportError;

/// Write one category's records to `<out_dir>/<label>_projects_<date>.csv`.
/// Creates the directory if needed; replaces a same-named file.
/// Returns the final path written to.
pub fn export_category(
    export: &ExportOptions,
    label: &str,
    projects: &ProjectCollection,
    date: NaiveDate,
) -> Result<PathBuf, ExportError> {
    let path = export.out_path(label, date);
    write_projects(&path, projects).map_err(|source| ExportError { path: path.clone(), source })?;
    Ok(path)
}

/// Header row plus one row per record, in reference order.
pub fn write_projects(path: &Path, projects: &ProjectCollection) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let rows: Vec<Vec<String>> = projects.records().map(|r| r.to_row()).collect();
    fs::write(path, to_table_string(&HEADERS, &rows, CSV_SEP))
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
