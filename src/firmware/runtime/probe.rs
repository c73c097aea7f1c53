use embassy_net::{dns::DnsQueryType, tcp::TcpSocket, Stack};
use embassy_time::{with_timeout, Duration};

use crate::firmware::link::HttpProbe;

const PROBE_RW_BUF: usize = 512;
const PROBE_REQUEST: &[u8] = b"GET\n\n";
const PROBE_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const PROBE_RESPONSE_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves the host through the radio's DNS server and sends a bare `GET`.
/// Reaching the host counts as success; the reply is only drained.
pub(super) struct TcpHttpProbe {
    stack: Stack<'static>,
}

impl TcpHttpProbe {
    pub(super) fn new(stack: Stack<'static>) -> Self {
        Self { stack }
    }
}

impl HttpProbe for TcpHttpProbe {
    async fn get(&mut self, host: &str, port: u16) -> bool {
        let address = match self.stack.dns_query(host, DnsQueryType::A).await {
            Ok(addresses) => match addresses.first() {
                Some(address) => *address,
                None => return false,
            },
            Err(err) => {
                log::warn!("probe: resolve {} err={:?}", host, err);
                return false;
            }
        };

        let mut rx_buffer = [0u8; PROBE_RW_BUF];
        let mut tx_buffer = [0u8; PROBE_RW_BUF];
        let mut socket = TcpSocket::new(self.stack, &mut rx_buffer, &mut tx_buffer);

        match with_timeout(PROBE_CONNECT_TIMEOUT, socket.connect((address, port))).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                log::warn!("probe: connect {} err={:?}", address, err);
                return false;
            }
            Err(_) => {
                log::warn!("probe: connect {} timed out", address);
                socket.abort();
                return false;
            }
        }

        if socket.write(PROBE_REQUEST).await.is_ok() {
            let mut reply = [0u8; 64];
            match with_timeout(PROBE_RESPONSE_TIMEOUT, socket.read(&mut reply)).await {
                Ok(Ok(len)) => log::debug!("probe: {} replied {} bytes", host, len),
                _ => log::debug!("probe: {} sent no reply", host),
            }
        }
        socket.close();
        let _ = with_timeout(Duration::from_millis(250), socket.flush()).await;
        true
    }
}
