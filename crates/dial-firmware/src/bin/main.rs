#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_time::{Delay, Instant, Timer};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use embedded_sdmmc::SdCard;
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::ledc::channel::{self, ChannelIFace};
use esp_hal::ledc::timer::{self, TimerIFace};
use esp_hal::ledc::{LSGlobalClkSource, Ledc, LowSpeed};
use esp_hal::spi::Mode;
use esp_hal::spi::master::{Config as SpiConfig, Spi};
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;
use log::{error, info};
use static_cell::StaticCell;

use mipidsi::interface::SpiInterface;
use mipidsi::models::GC9A01;
use mipidsi::options::{ColorInversion, ColorOrder};
use mipidsi::Builder as MipidsiBuilder;

use dial_core::app::App;
use dial_core::async_i2c_bus::{I2cBus, SharedI2c};
use dial_core::drivers::{Axp2101Gauge, Ft6336u, Pcf85063, PwmBacklight};
use dial_core::framebuffer::FrameBuffer;
use dial_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};
use dial_firmware::board::{HardwareRng, I2cDriver, WatchBoard};
use dial_firmware::sd_store::{FixedTime, SdSettingsStore};

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rtt_target::rprintln!("PANIC: {}", info);
    loop {}
}

extern crate alloc;

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

static SENSOR_BUS: StaticCell<I2cBus<I2cDriver>> = StaticCell::new();

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    rtt_target::rtt_init_log!();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 73744);
    // The framebuffer alone is larger than internal RAM can spare.
    esp_alloc::psram_allocator!(peripherals.PSRAM, esp_hal::psram);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    info!("Embassy initialized");

    // Touch controller on its own bus.
    let i2c_config = I2cConfig::default().with_frequency(Rate::from_khz(400));
    let touch_i2c = I2c::new(peripherals.I2C1, i2c_config)
        .expect("Failed to create touch I2C")
        .with_sda(peripherals.GPIO39)
        .with_scl(peripherals.GPIO40)
        .into_async();

    // RTC and power management share the sensor bus.
    let sensor_i2c = I2c::new(peripherals.I2C0, i2c_config)
        .expect("Failed to create sensor I2C")
        .with_sda(peripherals.GPIO10)
        .with_scl(peripherals.GPIO11)
        .into_async();
    let sensor_bus: &'static I2cBus<I2cDriver> = SENSOR_BUS.init(I2cBus::new(sensor_i2c));

    // Display
    let display_spi = Spi::new(
        peripherals.SPI2,
        SpiConfig::default()
            .with_frequency(Rate::from_mhz(40))
            .with_mode(Mode::_0),
    )
    .expect("Failed to create display SPI")
    .with_sck(peripherals.GPIO13)
    .with_mosi(peripherals.GPIO14);
    let lcd_cs = Output::new(peripherals.GPIO12, Level::High, OutputConfig::default());
    let lcd_dc = Output::new(peripherals.GPIO15, Level::Low, OutputConfig::default());
    let lcd_rst = Output::new(peripherals.GPIO16, Level::High, OutputConfig::default());

    let spi_device =
        ExclusiveDevice::new(display_spi, lcd_cs, NoDelay).expect("Failed to claim display CS");
    let mut spi_buffer = [0u8; 512];
    let di = SpiInterface::new(spi_device, lcd_dc, &mut spi_buffer);

    let mut display = MipidsiBuilder::new(GC9A01, di)
        .display_size(DISPLAY_WIDTH_PX as u16, DISPLAY_HEIGHT_PX as u16)
        .invert_colors(ColorInversion::Inverted)
        .color_order(ColorOrder::Bgr)
        .reset_pin(lcd_rst)
        .init(&mut Delay)
        .expect("Failed to initialize display");

    info!("Display initialized");

    // Backlight PWM
    let mut ledc = Ledc::new(peripherals.LEDC);
    ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);
    let mut backlight_timer = ledc.timer::<LowSpeed>(timer::Number::Timer0);
    backlight_timer
        .configure(timer::config::Config {
            duty: timer::config::Duty::Duty8Bit,
            clock_source: timer::LSClockSource::APBClk,
            frequency: Rate::from_khz(24),
        })
        .expect("Failed to configure backlight timer");
    let mut backlight_channel = ledc.channel(channel::Number::Channel0, peripherals.GPIO2);
    backlight_channel
        .configure(channel::config::Config {
            timer: &backlight_timer,
            duty_pct: 0,
            pin_config: channel::config::PinConfig::PushPull,
        })
        .expect("Failed to configure backlight channel");

    // Settings card
    let sd_spi = Spi::new(
        peripherals.SPI3,
        SpiConfig::default().with_frequency(Rate::from_khz(400)),
    )
    .expect("Failed to create SD card SPI")
    .with_sck(peripherals.GPIO4)
    .with_mosi(peripherals.GPIO5)
    .with_miso(peripherals.GPIO6);
    let sd_cs = Output::new(peripherals.GPIO7, Level::High, OutputConfig::default());
    let sd_device = ExclusiveDevice::new(sd_spi, sd_cs, Delay).expect("Failed to claim SD CS");
    let sd_card = SdCard::new(sd_device, Delay);

    let mut board = WatchBoard {
        touch: Ft6336u::new(touch_i2c),
        clock: Pcf85063::new(SharedI2c::new(sensor_bus)),
        battery: Axp2101Gauge::new(
            SharedI2c::new(sensor_bus),
            SharedI2c::new(sensor_bus),
        ),
        backlight: PwmBacklight::new(backlight_channel),
        random: HardwareRng::new(),
        store: SdSettingsStore::new(sd_card, FixedTime),
    };

    // Failure is already logged; the gauge still reads.
    board.battery.init().await.ok();

    let mut framebuffer = FrameBuffer::new();
    let mut app = App::new(Instant::now());
    app.boot(&mut board, Instant::now()).await;

    info!("Watch running");

    loop {
        let delay = app.step(&mut board, Instant::now()).await;

        let Ok(drawn) = app.draw(&mut framebuffer);
        if drawn {
            if let Err(e) = framebuffer.flush(&mut display) {
                error!("Display flush failed: {:?}", e);
            }
        }

        Timer::after(delay).await;
    }
}
