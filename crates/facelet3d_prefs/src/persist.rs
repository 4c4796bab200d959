use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use eyre::{OptionExt, Result};
use serde::Serialize;

const PREFS_FILE_NAME: &str = "prefs";
const PREFS_FILE_EXTENSION: &str = "yaml";

/// Returns the default user preferences file, in the platform's config
/// directory.
pub fn prefs_file() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "facelet3d").ok_or_eyre("no home directory")?;
    Ok(dirs
        .config_dir()
        .join(format!("{PREFS_FILE_NAME}.{PREFS_FILE_EXTENSION}")))
}

/// Returns a config source for the user preferences file. An explicit path
/// must exist; the default file may be missing.
pub fn user_config_source(
    path: Option<&Path>,
) -> Result<config::File<config::FileSourceFile, config::FileFormat>> {
    Ok(match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::from(prefs_file()?).required(false),
    })
}

/// Writes preferences to `path` as YAML, creating parent directories if
/// necessary.
pub fn save(path: &Path, prefs_data: &impl Serialize) -> Result<()> {
    if let Some(p) = path.parent() {
        std::fs::create_dir_all(p)?;
    }
    serde_norway::to_writer(std::fs::File::create(path)?, prefs_data)?;
    Ok(())
}
