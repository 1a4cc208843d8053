use std::path::PathBuf;

use snafu::Snafu;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Output directory {} does not exist", directory.display()))]
    DirectoryNotFound { directory: PathBuf },

    #[snafu(display("Could not resolve output path {}, error: {}", file_path.display(), source))]
    ResolvePath { source: std::io::Error, file_path: PathBuf },

    #[snafu(display("Could not serialize the merged profile, error: {}", source))]
    SerializeProfile { source: serde_yaml::Error },

    #[snafu(display("Could not write output file {}, error: {}", file_path.display(), source))]
    WriteFile { source: std::io::Error, file_path: PathBuf },
}
