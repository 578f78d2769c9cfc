mod common;

use common::{setup, BusError, BusOp, MockBus};
use embassy_futures::block_on;
use mpr121_touch_async::{Electrode, Error, RegisterInterface};

type Regs = RegisterInterface<MockBus, BusError>;

#[test]
fn write_register_sends_address_and_value() {
    let (device, bus, _) = setup();
    let mut regs: Regs = RegisterInterface::new(bus);

    block_on(regs.write_register(0x5E, 0x8F)).unwrap();
    assert_eq!(device.borrow().log, vec![BusOp::Write(0x5E, 0x8F)]);
}

#[test]
fn read_register_points_then_reads() {
    let (device, bus, _) = setup();
    device.borrow_mut().registers[0x5D] = 0x24;
    let mut regs: Regs = RegisterInterface::new(bus);

    assert_eq!(block_on(regs.read_register(0x5D)).unwrap(), 0x24);
    assert_eq!(device.borrow().pointer, 0x5D);
    assert_eq!(device.borrow().log, vec![BusOp::Read(0x5D)]);
}

#[test]
fn touch_mask_reads_low_then_high_and_drops_flags() {
    let (device, bus, _) = setup();
    device.borrow_mut().set_mask(0x8A05);
    let mut regs: Regs = RegisterInterface::new(bus);

    let mask = block_on(regs.read_touch_mask()).unwrap();
    assert_eq!(mask.bits(), 0x0A05);
    assert_eq!(
        device.borrow().log,
        vec![BusOp::Read(0x00), BusOp::Read(0x01)]
    );

    let status = block_on(regs.read_status()).unwrap();
    assert!(status.over_current());
    assert_eq!(status.mask(), mask);
}

#[test]
fn transport_errors_propagate() {
    let (device, bus, _) = setup();
    device.borrow_mut().fail_write = Some(0x80);
    device.borrow_mut().fail_reads = 1;
    let mut regs: Regs = RegisterInterface::new(bus);

    assert!(matches!(
        block_on(regs.write_register(0x80, 0x63)),
        Err(Error::Transport(BusError))
    ));
    assert!(matches!(
        block_on(regs.read_touch_mask()),
        Err(Error::Transport(BusError))
    ));
    assert!(device.borrow().log.is_empty());
}

#[test]
fn electrode_diagnostics_are_scaled_to_ten_bits() {
    let (device, bus, _) = setup();
    {
        let mut dev = device.borrow_mut();
        // Electrode 3: filtered data at 0x0A/0x0B, baseline at 0x21.
        dev.registers[0x0A] = 0x34;
        dev.registers[0x0B] = 0xFE;
        dev.registers[0x21] = 0x80;
    }
    let mut regs: Regs = RegisterInterface::new(bus);
    let three = Electrode::new(3).unwrap();

    assert_eq!(block_on(regs.read_filtered_data(three)).unwrap(), 0x234);
    assert_eq!(block_on(regs.read_baseline(three)).unwrap(), 0x200);
}
