use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Answers whether the network is usable before the first page is requested.
pub trait Connectivity {
    fn is_online(&self) -> bool;
}

impl Connectivity for bool {
    fn is_online(&self) -> bool {
        *self
    }
}

impl<F> Connectivity for F
where
    F: Fn() -> bool,
{
    fn is_online(&self) -> bool {
        self()
    }
}

/// Probes connectivity by opening a TCP connection to a known host.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }
}

impl Connectivity for TcpProbe {
    fn is_online(&self) -> bool {
        let addrs = match (self.host.as_str(), self.port).to_socket_addrs() {
            Ok(addrs) => addrs,
            Err(e) => {
                tracing::debug!(host = %self.host, error = %e, "Could not resolve probe host");
                return false;
            }
        };

        for addr in addrs {
            if TcpStream::connect_timeout(&addr, self.timeout).is_ok() {
                return true;
            }
        }
        tracing::debug!(host = %self.host, port = self.port, "Probe host unreachable");
        false
    }
}
