use embedded_graphics::prelude::Point;
use esp_hal::gpio::Input;
use stackpet::TouchSampler;

use super::platform::I2cOps;

pub(crate) const CHSC6X_ADDR: u8 = 0x2E;
const FRAME_LEN: usize = 5;

/// Single-touch CHSC6X controller on the round display.
///
/// The interrupt line is held low while a finger rests on the glass; the
/// coordinate frame is only read while it is.
pub(crate) struct Chsc6x<'d, I> {
    i2c: I,
    irq: Input<'d>,
}

impl<'d, I: I2cOps> Chsc6x<'d, I> {
    pub(crate) fn new(i2c: I, irq: Input<'d>) -> Self {
        Self { i2c, irq }
    }

    pub(crate) fn is_pressed(&self) -> bool {
        self.irq.is_low()
    }

    pub(crate) fn probe(&mut self) -> Result<bool, I::Error> {
        self.i2c.probe(CHSC6X_ADDR)
    }

    pub(crate) fn read_point(&mut self) -> Result<Option<Point>, I::Error> {
        let mut frame = [0u8; FRAME_LEN];
        self.i2c.read(CHSC6X_ADDR, &mut frame)?;
        Ok(decode_frame(&frame))
    }
}

impl<I: I2cOps> TouchSampler for Chsc6x<'_, I> {
    fn poll(&mut self) -> Option<Point> {
        if !self.is_pressed() {
            return None;
        }
        match self.read_point() {
            Ok(point) => point,
            Err(_) => {
                log::trace!("chsc6x: read failed, treating as no contact");
                None
            }
        }
    }
}

fn decode_frame(frame: &[u8; FRAME_LEN]) -> Option<Point> {
    (frame[0] == 1).then(|| Point::new(i32::from(frame[2]), i32::from(frame[4])))
}
