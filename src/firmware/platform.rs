use esp_hal::{
    i2c::master::{Error as I2cError, I2c},
    Blocking,
};

pub(crate) trait I2cOps {
    type Error;

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), Self::Error>;
    fn probe(&mut self, addr: u8) -> Result<bool, Self::Error>;
}

pub(crate) struct HalI2c<'d> {
    bus: I2c<'d, Blocking>,
}

impl<'d> HalI2c<'d> {
    pub(crate) fn new(bus: I2c<'d, Blocking>) -> Self {
        Self { bus }
    }
}

impl I2cOps for HalI2c<'_> {
    type Error = I2cError;

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.read(addr, buffer)
    }

    fn probe(&mut self, addr: u8) -> Result<bool, Self::Error> {
        // CHSC6X has no register pointer to write; probe with a one-byte read.
        let mut scratch = [0u8; 1];
        match self.bus.read(addr, &mut scratch) {
            Ok(()) => Ok(true),
            Err(I2cError::AcknowledgeCheckFailed(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }
}
