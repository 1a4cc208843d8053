use snafu::Snafu;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Could not load mapping file, error: {}", source))]
    LoadMapping { source: crate::mapping::Error },

    #[snafu(display("Could not load proxy list, error: {}", source))]
    LoadUpstreams { source: crate::upstream::Error },

    #[snafu(display("Could not load base profile, error: {}", source))]
    LoadProfile { source: crate::profile::Error },

    #[snafu(display("Could not merge the inputs, error: {}", source))]
    Merge { source: crate::merge::Error },

    #[snafu(display("Could not write the merged profile, error: {}", source))]
    WriteProfile { source: crate::output::Error },
}

impl From<crate::mapping::Error> for Error {
    fn from(source: crate::mapping::Error) -> Error { Error::LoadMapping { source } }
}

impl From<crate::upstream::Error> for Error {
    fn from(source: crate::upstream::Error) -> Error { Error::LoadUpstreams { source } }
}

impl From<crate::profile::Error> for Error {
    fn from(source: crate::profile::Error) -> Error { Error::LoadProfile { source } }
}

impl From<crate::merge::Error> for Error {
    fn from(source: crate::merge::Error) -> Error { Error::Merge { source } }
}

impl From<crate::output::Error> for Error {
    fn from(source: crate::output::Error) -> Error { Error::WriteProfile { source } }
}
