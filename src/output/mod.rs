mod error;

pub use self::error::Error;

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::profile::Profile;

const FILE_STEM: &str = "generated_clash_config";

/// Writes the merged profile into `output_dir` under a name carrying the
/// current local time to second precision, and returns the absolute path of
/// the written file.
pub fn write<P: AsRef<Path>>(output_dir: P, profile: &Profile) -> Result<PathBuf, Error> {
    let output_dir = output_dir.as_ref();
    if !output_dir.is_dir() {
        return Err(Error::DirectoryNotFound { directory: output_dir.to_owned() });
    }

    let file_name = format!("{FILE_STEM}_{}.yaml", Local::now().format("%Y%m%d%H%M%S"));
    let file_path = output_dir.join(file_name);
    let file_path = std::path::absolute(&file_path)
        .map_err(|source| Error::ResolvePath { source, file_path: file_path.clone() })?;

    let content =
        serde_yaml::to_string(profile).map_err(|source| Error::SerializeProfile { source })?;
    std::fs::write(&file_path, content)
        .map_err(|source| Error::WriteFile { source, file_path: file_path.clone() })?;

    info!("Wrote merged profile to {}", file_path.display());
    Ok(file_path)
}
