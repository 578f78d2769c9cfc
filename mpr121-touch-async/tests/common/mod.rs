//! Recording MPR121 stand-in for host tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::i2c::{ErrorKind, ErrorType, Operation, SevenBitAddress};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use mpr121_touch_async::registers::MPR121_ADDRESS;

/// One observable bus or delay operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp {
    Write(u8, u8),
    Read(u8),
    /// Requested wait in microseconds.
    DelayUs(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusError;

impl embedded_hal::i2c::Error for BusError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub struct Device {
    pub registers: [u8; 256],
    pub pointer: u8,
    pub log: Vec<BusOp>,
    /// Writes to this register fail until cleared.
    pub fail_write: Option<u8>,
    /// Number of upcoming reads that fail.
    pub fail_reads: usize,
}

impl Device {
    pub fn set_mask(&mut self, bits: u16) {
        self.registers[0x00] = bits as u8;
        self.registers[0x01] = (bits >> 8) as u8;
    }

    pub fn writes_to(&self, reg: u8) -> usize {
        self.log
            .iter()
            .filter(|op| matches!(op, BusOp::Write(r, _) if *r == reg))
            .count()
    }
}

pub type SharedDevice = Rc<RefCell<Device>>;

pub struct MockBus(pub SharedDevice);

pub struct MockDelay(pub SharedDevice);

pub fn setup() -> (SharedDevice, MockBus, MockDelay) {
    let device = Rc::new(RefCell::new(Device {
        registers: [0; 256],
        pointer: 0,
        log: Vec::new(),
        fail_write: None,
        fail_reads: 0,
    }));
    (
        device.clone(),
        MockBus(device.clone()),
        MockDelay(device),
    )
}

impl ErrorType for MockBus {
    type Error = BusError;
}

impl I2c<SevenBitAddress> for MockBus {
    async fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        assert_eq!(address, MPR121_ADDRESS);
        let mut dev = self.0.borrow_mut();
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => {
                    let reg = bytes[0];
                    if bytes.len() == 1 {
                        dev.pointer = reg;
                        continue;
                    }
                    if dev.fail_write == Some(reg) {
                        return Err(BusError);
                    }
                    for (i, value) in bytes[1..].iter().enumerate() {
                        dev.registers[reg as usize + i] = *value;
                        dev.log.push(BusOp::Write(reg + i as u8, *value));
                    }
                }
                Operation::Read(buf) => {
                    if dev.fail_reads > 0 {
                        dev.fail_reads -= 1;
                        return Err(BusError);
                    }
                    let reg = dev.pointer;
                    for (i, byte) in buf.iter_mut().enumerate() {
                        *byte = dev.registers[reg as usize + i];
                    }
                    dev.log.push(BusOp::Read(reg));
                }
            }
        }
        Ok(())
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().log.push(BusOp::DelayUs(ns.div_ceil(1_000)));
    }

    async fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().log.push(BusOp::DelayUs(us));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().log.push(BusOp::DelayUs(ms.saturating_mul(1_000)));
    }
}
