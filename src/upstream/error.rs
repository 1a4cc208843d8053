use std::path::PathBuf;

use snafu::Snafu;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Proxy list file {} does not exist", file_path.display()))]
    FileNotFound { file_path: PathBuf },

    #[snafu(display("Could not read proxy list file {}, error: {}", file_path.display(), source))]
    ReadFile { source: std::io::Error, file_path: PathBuf },
}
