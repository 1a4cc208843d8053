use std::path::PathBuf;

use snafu::Snafu;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Mapping file {} does not exist", file_path.display()))]
    FileNotFound { file_path: PathBuf },

    #[snafu(display("Could not read mapping file {}, error: {}", file_path.display(), source))]
    ReadFile { source: std::io::Error, file_path: PathBuf },

    #[snafu(display("Could not parse mapping file {}, error: {}", file_path.display(), source))]
    ParseJson { source: serde_json::Error, file_path: PathBuf },

    #[snafu(display("Mapping file {} must contain a JSON object at the top level", file_path.display()))]
    NotAnObject { file_path: PathBuf },
}
