use snafu::Snafu;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Proxy list line {}: port {:?} is not a valid port number", line_number, port))]
    InvalidUpstreamPort { line_number: usize, port: String },

    #[snafu(display("Mapping entry {:?}: `socks_local` must be an `ip:port` string, got {}", key, value))]
    InvalidLocalAddress { key: String, value: String },

    #[snafu(display("Mapping entry {:?}: local port {:?} is not a valid port number", key, port))]
    InvalidLocalPort { key: String, port: String },

    #[snafu(display("Mapping entry {:?}: `socks_remote` is missing or empty", key))]
    MissingRemote { key: String },

    #[snafu(display("Mapping entry {:?}: no upstream proxy matches `socks_remote` {:?}", key, remote))]
    UnresolvedRemote { key: String, remote: String },
}
