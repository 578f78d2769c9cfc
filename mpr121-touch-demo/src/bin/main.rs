#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those     holding buffers for the duration of a data transfer."
)]

use embassy_executor::Spawner;
use embassy_time::{Delay, Duration, Timer};
use esp_hal::i2c::master::I2c;
use esp_hal::Async;
use esp_hal::{clock::CpuClock, time::Rate, timer::systimer::SystemTimer};
use esp_println::println;
use log::{debug, error, info, warn};
use mpr121_touch_async::{Config, TouchController};

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    println!("{}", info);
    loop {}
}

extern crate alloc;

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

type Mpr121 = TouchController<I2c<'static, Async>, esp_hal::i2c::master::Error, Delay>;

/// Logical channel 0 sits on electrode 8 of the keypad wiring.
const CHANNEL_OFFSET: i32 = 4;

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    esp_println::logger::init_logger(log::LevelFilter::Debug);
    info!("Logger initialized");

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Handlers are boxed closures.
    esp_alloc::heap_allocator!(size: 16 * 1024);

    let timer0 = SystemTimer::new(peripherals.SYSTIMER);
    esp_hal_embassy::init(timer0.alarm0);

    let touch_scl = peripherals.GPIO14;
    let touch_sda = peripherals.GPIO13;
    let config = esp_hal::i2c::master::Config::default().with_frequency(Rate::from_khz(100));
    let touch_i2c = I2c::new(peripherals.I2C0, config)
        .unwrap()
        .with_sda(touch_sda)
        .with_scl(touch_scl)
        .into_async();

    let mut touch = TouchController::new(touch_i2c, Delay, Config::default());
    touch.set_channel_offset(CHANNEL_OFFSET);

    let registered = async {
        touch
            .on_pressed(|channel| info!("Pressed channel {channel}"))
            .await?;
        touch
            .on_released(|channel| info!("Released channel {channel}"))
            .await
    };
    match registered.await {
        Ok(()) => debug!("Touch controller initialized."),
        Err(err) => warn!("Error initializing touch controller: {err:?}"),
    };

    spawner.spawn(poll_touch(touch)).unwrap();

    loop {
        Timer::after(Duration::from_secs(1)).await;
    }
}

/// Polls the MPR121 for the lifetime of the program.
#[embassy_executor::task]
async fn poll_touch(mut touch: Mpr121) {
    loop {
        match touch.run().await {
            Ok(never) => match never {},
            Err(err) => {
                error!("Touch controller bring-up failed: {err:?}");
                Timer::after(Duration::from_secs(1)).await;
            }
        }
    }
}
