use std::io::{BufReader, Read, Write};
use std::net::TcpStream;
use std::os::unix::net::UnixStream;
use std::time::Duration;

use vsh_rpc::{Call, Reply, ShellError};

use crate::address::Address;

/// How long a single read blocks before the connection re-checks the
/// interrupt flag (§5 "Cancellation"). Short enough that a Ctrl-C while
/// waiting on a slow or wedged remote service is noticed promptly,
/// long enough not to busy-poll.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

enum Socket {
    Unix(UnixStream),
    Tcp(TcpStream),
}

impl Socket {
    fn set_read_timeout(&self, timeout: Duration) -> std::io::Result<()> {
        match self {
            Socket::Unix(s) => s.set_read_timeout(Some(timeout)),
            Socket::Tcp(s) => s.set_read_timeout(Some(timeout)),
        }
    }
}

impl Read for Socket {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Socket::Unix(s) => s.read(buf),
            Socket::Tcp(s) => s.read(buf),
        }
    }
}

impl Write for Socket {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Socket::Unix(s) => s.write(buf),
            Socket::Tcp(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Socket::Unix(s) => s.flush(),
            Socket::Tcp(s) => s.flush(),
        }
    }
}

/// One blocking varlink connection (SPEC_FULL.md §4.7). Opened on entry
/// to a `varlink` stage, closed via `Drop` on every exit path.
pub struct Connection {
    addr: String,
    reader: BufReader<Socket>,
}

impl Connection {
    pub fn connect(address: &Address) -> Result<Self, ShellError> {
        let (addr, socket) = match address {
            Address::UnixPath(path) => {
                let stream = UnixStream::connect(path).map_err(|e| {
                    ShellError::VarlinkConnectionFailed {
                        message: format!("unix:{path}: {e}"),
                    }
                })?;
                (format!("unix:{path}"), Socket::Unix(stream))
            }
            Address::UnixAbstract(name) => {
                use std::os::linux::net::SocketAddrExt;
                use std::os::unix::net::SocketAddr;
                let sockaddr = SocketAddr::from_abstract_name(name.as_bytes()).map_err(|e| {
                    ShellError::VarlinkConnectionFailed {
                        message: format!("unix:@{name}: {e}"),
                    }
                })?;
                let stream = UnixStream::connect_addr(&sockaddr).map_err(|e| {
                    ShellError::VarlinkConnectionFailed {
                        message: format!("unix:@{name}: {e}"),
                    }
                })?;
                (format!("unix:@{name}"), Socket::Unix(stream))
            }
            Address::Tcp { host, port } => {
                let stream = TcpStream::connect((host.as_str(), *port)).map_err(|e| {
                    ShellError::VarlinkConnectionFailed {
                        message: format!("tcp:{host}:{port}: {e}"),
                    }
                })?;
                (format!("tcp:{host}:{port}"), Socket::Tcp(stream))
            }
        };
        if let Err(e) = socket.set_read_timeout(POLL_INTERVAL) {
            return Err(ShellError::VarlinkConnectionFailed {
                message: format!("{addr}: setting read timeout: {e}"),
            });
        }
        tracing::debug!(addr = %addr, "varlink connected");
        Ok(Self { addr, reader: BufReader::new(socket) })
    }

    /// Send one call and collect every reply up to and including the
    /// final one (`continues: false` or absent).
    pub fn call(&mut self, call: &Call) -> Result<Vec<Reply>, ShellError> {
        self.send(call)?;
        let mut replies = Vec::new();
        loop {
            let reply = self.recv()?;
            let is_final = reply.is_final();
            replies.push(reply);
            if is_final {
                break;
            }
        }
        Ok(replies)
    }

    fn send(&mut self, call: &Call) -> Result<(), ShellError> {
        let mut frame = serde_json::to_vec(call).map_err(|e| ShellError::InvalidJson {
            message: format!("encoding call: {e}"),
        })?;
        frame.push(0);
        self.reader.get_mut().write_all(&frame).map_err(|e| {
            ShellError::VarlinkConnectionFailed { message: format!("{}: write failed: {e}", self.addr) }
        })
    }

    /// Read one NUL-terminated frame. The socket has a short read timeout
    /// (`POLL_INTERVAL`) rather than blocking indefinitely, so a Ctrl-C
    /// while waiting on a slow remote service is noticed within one
    /// interval instead of hanging the whole process (§5 "Cancellation").
    fn recv(&mut self) -> Result<Reply, ShellError> {
        let mut buf = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => {
                    return Err(ShellError::VarlinkConnectionFailed {
                        message: format!("{}: connection closed", self.addr),
                    })
                }
                Ok(_) if byte[0] == 0 => break,
                Ok(_) => buf.push(byte[0]),
                Err(e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    if vsh_rpc::cancel::is_requested() {
                        return Err(ShellError::VarlinkConnectionFailed {
                            message: format!("{}: interrupted", self.addr),
                        });
                    }
                }
                Err(e) => {
                    return Err(ShellError::VarlinkConnectionFailed {
                        message: format!("{}: read failed: {e}", self.addr),
                    })
                }
            }
        }
        serde_json::from_slice(&buf).map_err(|e| ShellError::InvalidJson {
            message: format!("decoding reply: {e}"),
        })
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        tracing::debug!(addr = %self.addr, "varlink connection closed");
    }
}
