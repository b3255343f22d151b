mod chsc6x;
mod clock;
mod config;
mod platform;
mod tasks;
mod types;

use esp_hal::{
    gpio::{Input, InputConfig, Pull},
    i2c::master::{Config as I2cConfig, I2c, SoftwareTimeout},
    time::{Duration as HalDuration, Rate},
    timer::timg::TimerGroup,
};
use stackpet::{config::active_config, Clamped};

use self::{
    chsc6x::Chsc6x,
    config::{I2C_FREQUENCY_KHZ, I2C_TIMEOUT_MS},
    platform::HalI2c,
};

pub(crate) fn run() -> ! {
    esp_println::logger::init_logger_from_env();

    let peripherals = esp_hal::init(esp_hal::Config::default());
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let i2c_cfg = I2cConfig::default()
        .with_frequency(Rate::from_khz(I2C_FREQUENCY_KHZ))
        .with_software_timeout(SoftwareTimeout::Transaction(HalDuration::from_millis(
            I2C_TIMEOUT_MS,
        )));
    let i2c = match I2c::new(peripherals.I2C0, i2c_cfg) {
        Ok(i2c) => i2c.with_sda(peripherals.GPIO5).with_scl(peripherals.GPIO6),
        Err(err) => {
            log::error!("boot: i2c init failed: {:?}", err);
            halt_forever();
        }
    };
    let touch_irq = Input::new(peripherals.GPIO44, InputConfig::default().with_pull(Pull::Up));

    let mut touch = Chsc6x::new(HalI2c::new(i2c), touch_irq);
    match touch.probe() {
        Ok(true) => log::info!("boot: chsc6x ready at 0x{:02x}", chsc6x::CHSC6X_ADDR),
        Ok(false) => log::warn!("boot: chsc6x did not ack, continuing"),
        Err(err) => log::warn!("boot: chsc6x probe failed: {:?}", err),
    }
    let panel = Clamped::new(touch, active_config().panel);

    let mut executor = esp_rtos::embassy::Executor::new();
    let executor = unsafe { make_static(&mut executor) };
    executor.run(move |spawner| {
        spawner.must_spawn(tasks::gesture_task(panel));
        spawner.must_spawn(tasks::pose_trace_task());
    });
}

unsafe fn make_static<T>(value: &mut T) -> &'static mut T {
    unsafe { core::mem::transmute(value) }
}

fn halt_forever() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
