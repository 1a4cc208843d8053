use std::path::PathBuf;

use snafu::Snafu;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Base profile {} does not exist", file_path.display()))]
    FileNotFound { file_path: PathBuf },

    #[snafu(display("Could not read base profile {}, error: {}", file_path.display(), source))]
    ReadFile { source: std::io::Error, file_path: PathBuf },

    #[snafu(display("Could not parse base profile {}, error: {}", file_path.display(), source))]
    ParseYaml { source: serde_yaml::Error, file_path: PathBuf },

    #[snafu(display("Base profile {} must contain a YAML mapping at the top level", file_path.display()))]
    NotAMapping { file_path: PathBuf },
}
