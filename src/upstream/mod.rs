mod error;

pub use self::error::Error;

use std::path::Path;

use tracing::{debug, warn};

/// One upstream SOCKS5 credential read from the proxy list, in file order.
///
/// The port is kept as the raw field text; it is validated when the merge
/// stage turns the record into an outbound proxy, so the offending source
/// line can be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyServer {
    pub ip: String,
    pub port: String,
    pub username: String,
    pub password: String,
    pub line_number: usize,
}

/// Loads the proxy list from `file_path`.
pub fn load<P: AsRef<Path>>(file_path: P) -> Result<Vec<ProxyServer>, Error> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(Error::FileNotFound { file_path: file_path.to_owned() });
    }

    let content = std::fs::read_to_string(file_path)
        .map_err(|source| Error::ReadFile { source, file_path: file_path.to_owned() })?;

    let servers = parse(&content);
    debug!("Read {} upstream server(s) from {}", servers.len(), file_path.display());
    Ok(servers)
}

/// Parses proxy list content, one `ip:port:username:password` record per
/// line. Blank lines and `#` comments are skipped; lines that do not split
/// into exactly four fields are logged and skipped. A file with no valid
/// lines yields an empty list.
pub fn parse(content: &str) -> Vec<ProxyServer> {
    let mut servers = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<_> = line.split(':').collect();
        match fields.as_slice() {
            [ip, port, username, password] => servers.push(ProxyServer {
                ip: (*ip).to_owned(),
                port: (*port).to_owned(),
                username: (*username).to_owned(),
                password: (*password).to_owned(),
                line_number: index + 1,
            }),
            _ => {
                warn!("Proxy list line {} is not `ip:port:username:password`: {:?}", index + 1, line);
            }
        }
    }

    servers
}
