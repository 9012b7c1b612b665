use vsh_rpc::ShellError;

/// A parsed varlink address (SPEC_FULL.md §4.7). `mode` is accepted in the
/// `unix:` grammar for compatibility with the well-known address syntax
/// but has no effect on an outbound client connection — it governs the
/// permissions of a *listening* socket, which this shell never creates.
#[derive(Debug, Clone, PartialEq)]
pub enum Address {
    UnixPath(String),
    UnixAbstract(String),
    Tcp { host: String, port: u16 },
}

/// Parse one of `unix:/absolute/path[;mode=NNNN]`, `unix:@abstract-name`,
/// `tcp:host:port`, `tcp:[v6-literal]:port`.
pub fn parse(raw: &str) -> Result<Address, ShellError> {
    let fail = || ShellError::VarlinkConnectionFailed {
        message: format!("unrecognised address '{raw}'"),
    };

    if let Some(rest) = raw.strip_prefix("unix:") {
        if let Some(name) = rest.strip_prefix('@') {
            return Ok(Address::UnixAbstract(name.to_string()));
        }
        let path = rest.split(';').next().unwrap_or(rest);
        if path.is_empty() {
            return Err(fail());
        }
        return Ok(Address::UnixPath(path.to_string()));
    }

    if let Some(rest) = raw.strip_prefix("tcp:") {
        if let Some(after_bracket) = rest.strip_prefix('[') {
            let (host, rest) = after_bracket.split_once(']').ok_or_else(fail)?;
            let port = rest.strip_prefix(':').ok_or_else(fail)?;
            let port: u16 = port.parse().map_err(|_| fail())?;
            return Ok(Address::Tcp { host: host.to_string(), port });
        }
        let (host, port) = rest.rsplit_once(':').ok_or_else(fail)?;
        if host.is_empty() {
            return Err(fail());
        }
        let port: u16 = port.parse().map_err(|_| fail())?;
        return Ok(Address::Tcp { host: host.to_string(), port });
    }

    Err(fail())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unix_path() {
        assert_eq!(parse("unix:/run/vsh.sock").unwrap(), Address::UnixPath("/run/vsh.sock".into()));
    }

    #[test]
    fn parses_unix_path_with_mode_suffix() {
        assert_eq!(
            parse("unix:/run/vsh.sock;mode=0600").unwrap(),
            Address::UnixPath("/run/vsh.sock".into())
        );
    }

    #[test]
    fn parses_unix_abstract() {
        assert_eq!(parse("unix:@vsh").unwrap(), Address::UnixAbstract("vsh".into()));
    }

    #[test]
    fn parses_tcp() {
        assert_eq!(
            parse("tcp:localhost:1234").unwrap(),
            Address::Tcp { host: "localhost".into(), port: 1234 }
        );
    }

    #[test]
    fn parses_tcp_v6_literal() {
        assert_eq!(
            parse("tcp:[::1]:1234").unwrap(),
            Address::Tcp { host: "::1".into(), port: 1234 }
        );
    }

    #[test]
    fn rejects_unrecognised_scheme() {
        assert!(parse("http://example.com").is_err());
    }
}
