use embassy_net::{dns::DnsQueryType, tcp::{State, TcpSocket}, Stack};
use embassy_time::{with_timeout, Duration};

use crate::firmware::{config::CLOUD_PORT, link::CloudLink};

const CLOUD_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Cloud session modelled as one long-lived TCP connection to the backend.
pub(super) struct TcpCloudLink {
    stack: Stack<'static>,
    socket: TcpSocket<'static>,
    host: &'static str,
}

impl TcpCloudLink {
    pub(super) fn new(
        stack: Stack<'static>,
        rx_buffer: &'static mut [u8],
        tx_buffer: &'static mut [u8],
        host: &'static str,
    ) -> Self {
        Self {
            stack,
            socket: TcpSocket::new(stack, rx_buffer, tx_buffer),
            host,
        }
    }
}

impl CloudLink for TcpCloudLink {
    async fn connect(&mut self) {
        if self.socket.state() != State::Closed {
            log::debug!("cloud: resetting stale session state={:?}", self.socket.state());
            self.socket.abort();
            let _ = with_timeout(Duration::from_millis(250), self.socket.flush()).await;
        }

        let address = match self.stack.dns_query(self.host, DnsQueryType::A).await {
            Ok(addresses) => match addresses.first() {
                Some(address) => *address,
                None => {
                    log::warn!("cloud: {} has no address", self.host);
                    return;
                }
            },
            Err(err) => {
                log::warn!("cloud: resolve {} err={:?}", self.host, err);
                return;
            }
        };

        match with_timeout(
            CLOUD_CONNECT_TIMEOUT,
            self.socket.connect((address, CLOUD_PORT)),
        )
        .await
        {
            Ok(Ok(())) => log::info!("cloud: connected {}:{}", address, CLOUD_PORT),
            Ok(Err(err)) => {
                log::warn!("cloud: connect err={:?}", err);
                self.socket.abort();
            }
            Err(_) => {
                log::warn!("cloud: connect timed out");
                self.socket.abort();
            }
        }
    }

    async fn disconnect(&mut self) {
        self.socket.close();
        let _ = with_timeout(Duration::from_millis(250), self.socket.flush()).await;
        self.socket.abort();
    }

    fn is_connected(&self) -> bool {
        self.socket.state() == State::Established
    }
}
