//! Byte-level access to the MPR121 register file.

use embedded_hal_async::i2c::{I2c, SevenBitAddress};
use log::warn;

use crate::error::Error;
use crate::mask::{Electrode, TouchMask};
use crate::registers::{
    self, MPR121_ADDRESS, OVER_CURRENT_FLAG, REG_TOUCH_STATUS_H, REG_TOUCH_STATUS_L,
};

/// Raw touch status word as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchStatus(u16);

impl TouchStatus {
    pub fn mask(&self) -> TouchMask {
        TouchMask::new(self.0)
    }

    /// The device stops measuring while this flag is set; clearing it needs a reset.
    pub fn over_current(&self) -> bool {
        self.0 & OVER_CURRENT_FLAG != 0
    }
}

/// Single-register reads and writes at the fixed device address.
pub struct RegisterInterface<
    I2cType: I2c<SevenBitAddress, Error = ErrorType>,
    ErrorType: embedded_hal_async::i2c::Error,
> {
    i2c: I2cType,
}

impl<
        I2cType: I2c<SevenBitAddress, Error = ErrorType>,
        ErrorType: embedded_hal_async::i2c::Error,
    > RegisterInterface<I2cType, ErrorType>
{
    pub fn new(i2c: I2cType) -> Self {
        Self { i2c }
    }

    /// Gives the bus back.
    pub fn release(self) -> I2cType {
        self.i2c
    }

    /// Writes one byte to `reg`.
    pub async fn write_register(&mut self, reg: u8, value: u8) -> Result<(), Error<ErrorType>> {
        self.i2c
            .write(MPR121_ADDRESS, &[reg, value])
            .await
            .map_err(|err| {
                warn!("Error writing register {reg:#04x}: {err:?}");
                Error::Transport(err)
            })
    }

    /// Sets the register pointer to `reg` and reads one byte back.
    pub async fn read_register(&mut self, reg: u8) -> Result<u8, Error<ErrorType>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(MPR121_ADDRESS, &[reg], &mut buf)
            .await
            .map_err(|err| {
                warn!("Error reading register {reg:#04x}: {err:?}");
                Error::Transport(err)
            })?;
        Ok(buf[0])
    }

    /// Reads both touch status registers, low byte first.
    pub async fn read_status(&mut self) -> Result<TouchStatus, Error<ErrorType>> {
        let low = self.read_register(REG_TOUCH_STATUS_L).await?;
        let high = self.read_register(REG_TOUCH_STATUS_H).await?;
        Ok(TouchStatus(((high as u16) << 8) | low as u16))
    }

    /// Reads the 12-bit electrode touch mask.
    pub async fn read_touch_mask(&mut self) -> Result<TouchMask, Error<ErrorType>> {
        Ok(self.read_status().await?.mask())
    }

    /// Reads the 10-bit filtered measurement of `electrode`.
    pub async fn read_filtered_data(
        &mut self,
        electrode: Electrode,
    ) -> Result<u16, Error<ErrorType>> {
        let reg = registers::filtered_data(electrode.index());
        let low = self.read_register(reg).await?;
        let high = self.read_register(reg + 1).await?;
        Ok((((high & 0x03) as u16) << 8) | low as u16)
    }

    /// Reads the baseline of `electrode`, scaled to the filtered data range.
    ///
    /// The register holds the upper 8 of 10 bits.
    pub async fn read_baseline(&mut self, electrode: Electrode) -> Result<u16, Error<ErrorType>> {
        let value = self
            .read_register(registers::baseline(electrode.index()))
            .await?;
        Ok((value as u16) << 2)
    }
}
