//! Register map and fixed constants of the MPR121.

/// 7-bit bus address of the device (ADDR pin tied to SDA).
pub const MPR121_ADDRESS: u8 = 0x5B;

/// Number of sensing electrodes.
pub const ELECTRODE_COUNT: u8 = 12;

/// Bits of the touch status word that carry electrode state.
pub const TOUCH_MASK_BITS: u16 = 0x0FFF;

/// Over-current flag in the touch status word (bit 7 of the high byte).
pub const OVER_CURRENT_FLAG: u16 = 0x8000;

// --- Status and data ---
pub const REG_TOUCH_STATUS_L: u8 = 0x00;
pub const REG_TOUCH_STATUS_H: u8 = 0x01;
pub const REG_FILTERED_DATA_0L: u8 = 0x04;
pub const REG_BASELINE_0: u8 = 0x1E;

// --- Baseline filter block, rising / falling / touched ---
pub const REG_MHDR: u8 = 0x2B;
pub const REG_NHDR: u8 = 0x2C;
pub const REG_NCLR: u8 = 0x2D;
pub const REG_FDLR: u8 = 0x2E;
pub const REG_MHDF: u8 = 0x2F;
pub const REG_NHDF: u8 = 0x30;
pub const REG_NCLF: u8 = 0x31;
pub const REG_FDLF: u8 = 0x32;
pub const REG_NHDT: u8 = 0x33;
pub const REG_NCLT: u8 = 0x34;
pub const REG_FDLT: u8 = 0x35;

// --- Thresholds ---
pub const REG_TOUCH_THRESHOLD_0: u8 = 0x41;
pub const REG_RELEASE_THRESHOLD_0: u8 = 0x42;

// --- Configuration ---
pub const REG_DEBOUNCE: u8 = 0x5B;
pub const REG_CONFIG1: u8 = 0x5C;
pub const REG_CONFIG2: u8 = 0x5D;
pub const REG_ELECTRODE_CONFIG: u8 = 0x5E;
pub const REG_SOFT_RESET: u8 = 0x80;

/// Value written to [`REG_SOFT_RESET`] to reset the device.
pub const SOFT_RESET_CODE: u8 = 0x63;

/// [`REG_ELECTRODE_CONFIG`] value that stops all electrodes.
pub const ECR_STOP: u8 = 0x00;

/// [`REG_ELECTRODE_CONFIG`] value that runs electrodes 0-11 with baseline tracking.
pub const ECR_RUN_12: u8 = 0x8F;

/// FFI = 6 samples, CDC = 16 uA.
pub const CONFIG1_VALUE: u8 = 0x10;

/// CDT = 0.5 us, SFI = 4 samples, ESI = 16 ms.
pub const CONFIG2_VALUE: u8 = 0x24;

/// Recommended baseline filter settings, in the order they are written.
pub const FILTER_SETTINGS: [(u8, u8); 11] = [
    (REG_MHDR, 0x01),
    (REG_NHDR, 0x01),
    (REG_NCLR, 0x00),
    (REG_FDLR, 0x00),
    (REG_MHDF, 0x01),
    (REG_NHDF, 0x01),
    (REG_NCLF, 0xFF),
    (REG_FDLF, 0x02),
    (REG_NHDT, 0x01),
    (REG_NCLT, 0xFF),
    (REG_FDLT, 0x02),
];

/// Touch threshold register of electrode `k`.
pub const fn touch_threshold(k: u8) -> u8 {
    REG_TOUCH_THRESHOLD_0 + 2 * k
}

/// Release threshold register of electrode `k`.
pub const fn release_threshold(k: u8) -> u8 {
    REG_RELEASE_THRESHOLD_0 + 2 * k
}

/// Low byte of the filtered data pair of electrode `k`.
pub const fn filtered_data(k: u8) -> u8 {
    REG_FILTERED_DATA_0L + 2 * k
}

/// Baseline register of electrode `k`.
pub const fn baseline(k: u8) -> u8 {
    REG_BASELINE_0 + k
}
