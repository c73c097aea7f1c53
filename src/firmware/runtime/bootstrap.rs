use embassy_net::{Runner, StackResources};
use esp_hal::{
    rng::Rng,
    timer::timg::TimerGroup,
    uart::{Config as UartConfig, Uart},
};
use esp_radio::wifi::{Config as WifiRuntimeConfig, WifiDevice};
use static_cell::StaticCell;

use super::{
    cloud::TcpCloudLink, console::console_task, pacer::EmbassyPacer, probe::TcpHttpProbe,
    radio::EspRadioLink,
};
use crate::firmware::{
    config::{cloud_host, compiled_wifi_credentials, NetPolicy, UART_BAUD},
    net::NetController,
};

const HEAP_BYTES: usize = 72 * 1024;
const CLOUD_RW_BUF: usize = 1024;
const WIFI_RX_QUEUE_SIZE: usize = 3;
const WIFI_TX_QUEUE_SIZE: usize = 2;

pub fn run() -> ! {
    esp_println::logger::init_logger(log::LevelFilter::Info);

    let peripherals = esp_hal::init(esp_hal::Config::default());
    esp_alloc::heap_allocator!(size: HEAP_BYTES);
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let uart_cfg = UartConfig::default().with_baudrate(UART_BAUD);
    let uart = match Uart::new(peripherals.UART0, uart_cfg) {
        Ok(uart) => uart
            .with_rx(peripherals.GPIO3)
            .with_tx(peripherals.GPIO1)
            .into_async(),
        Err(err) => {
            log::error!("boot: uart0 init err={:?}", err);
            halt_forever();
        }
    };

    static RADIO_CTRL: StaticCell<esp_radio::Controller<'static>> = StaticCell::new();
    static STACK_RESOURCES: StaticCell<StackResources<4>> = StaticCell::new();
    static CLOUD_RX: StaticCell<[u8; CLOUD_RW_BUF]> = StaticCell::new();
    static CLOUD_TX: StaticCell<[u8; CLOUD_RW_BUF]> = StaticCell::new();

    let radio_ctrl = match esp_radio::init() {
        Ok(ctrl) => RADIO_CTRL.init(ctrl),
        Err(err) => {
            log::error!("boot: esp_radio::init err={:?}", err);
            halt_forever();
        }
    };
    let (controller, ifaces) =
        match esp_radio::wifi::new(radio_ctrl, peripherals.WIFI, wifi_runtime_config()) {
            Ok(parts) => parts,
            Err(err) => {
                log::error!("boot: wifi init err={:?}", err);
                halt_forever();
            }
        };

    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;
    let (stack, net_runner) = embassy_net::new(
        ifaces.sta,
        embassy_net::Config::dhcpv4(Default::default()),
        STACK_RESOURCES.init(StackResources::<4>::new()),
        seed,
    );

    let radio = EspRadioLink::new(controller, stack, compiled_wifi_credentials());
    let cloud = TcpCloudLink::new(
        stack,
        CLOUD_RX.init([0u8; CLOUD_RW_BUF]),
        CLOUD_TX.init([0u8; CLOUD_RW_BUF]),
        cloud_host(),
    );
    let net = NetController::new(radio, cloud, EmbassyPacer, NetPolicy::defaults());
    let probe = TcpHttpProbe::new(stack);
    log::info!("boot: radio and stack ready");

    static EXECUTOR: StaticCell<esp_rtos::embassy::Executor> = StaticCell::new();
    let executor = EXECUTOR.init(esp_rtos::embassy::Executor::new());
    executor.run(move |spawner| {
        spawner.must_spawn(net_task(net_runner));
        spawner.must_spawn(console_task(uart, net, probe));
    });
}

fn wifi_runtime_config() -> WifiRuntimeConfig {
    WifiRuntimeConfig::default()
        .with_rx_queue_size(WIFI_RX_QUEUE_SIZE)
        .with_tx_queue_size(WIFI_TX_QUEUE_SIZE)
}

#[embassy_executor::task]
async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await
}

fn halt_forever() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
