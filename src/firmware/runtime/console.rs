use core::fmt::Write;

use esp_hal::{uart::Uart, Async};

use super::{cloud::TcpCloudLink, pacer::EmbassyPacer, probe::TcpHttpProbe, radio::EspRadioLink};
use crate::firmware::{
    config::CONSOLE_REPLY_MAX,
    console::{ConsoleLineReader, LineReadEvent, MenuLayout, MenuSession},
    net::NetController,
};

pub(super) type SerialUart = Uart<'static, Async>;
pub(super) type BoardController = NetController<EspRadioLink, TcpCloudLink, EmbassyPacer>;

#[embassy_executor::task]
pub(super) async fn console_task(
    mut uart: SerialUart,
    mut net: BoardController,
    mut probe: TcpHttpProbe,
) {
    let mut reader = ConsoleLineReader::new();
    let mut session = MenuSession::new(MenuLayout::from_features());
    let mut reply = heapless::String::<CONSOLE_REPLY_MAX>::new();
    let mut rx = [0u8; 1];

    log::info!("console: layout={:?}", session.layout());
    reply.clear();
    let _ = write!(&mut reply, "\r\nDNS Test v{}\r\n", env!("CARGO_PKG_VERSION"));
    let _ = session.write_prompt(&net, &mut reply);
    uart_write_all(&mut uart, reply.as_bytes()).await;

    loop {
        let n = match uart.read_async(&mut rx).await {
            Ok(n) => n,
            Err(err) => {
                log::warn!("console: uart read err={:?}", err);
                continue;
            }
        };
        if n == 0 {
            continue;
        }

        // Echo so the operator sees what was typed.
        uart_write_all(&mut uart, &rx[..n]).await;

        reply.clear();
        match reader.push_byte(rx[0]) {
            LineReadEvent::None => continue,
            LineReadEvent::Overflow => {
                let _ = reply.push_str("\r\nline too long\r\n");
            }
            LineReadEvent::Complete(line) => {
                let _ = reply.push_str("\r\n");
                if session
                    .handle_line(&mut net, &mut probe, line, &mut reply)
                    .await
                    .is_err()
                {
                    log::warn!("console: reply truncated at {} bytes", reply.len());
                }
            }
        }
        uart_write_all(&mut uart, reply.as_bytes()).await;

        reply.clear();
        let _ = session.write_prompt(&net, &mut reply);
        uart_write_all(&mut uart, reply.as_bytes()).await;
    }
}

async fn uart_write_all(uart: &mut SerialUart, mut bytes: &[u8]) -> bool {
    while !bytes.is_empty() {
        match uart.write_async(bytes).await {
            Ok(0) => return false,
            Ok(written) => bytes = &bytes[written..],
            Err(_) => return false,
        }
    }
    true
}
