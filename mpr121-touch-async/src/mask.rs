//! Touch mask, electrode and channel index types.

use core::fmt;

use crate::registers::{ELECTRODE_COUNT, TOUCH_MASK_BITS};

/// A physical electrode index, always in `0..12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Electrode(u8);

impl Electrode {
    /// Returns `None` for indices past the last electrode.
    pub const fn new(index: u8) -> Option<Self> {
        if index < ELECTRODE_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Iterates all electrodes in ascending order.
    pub fn all() -> impl Iterator<Item = Electrode> {
        (0..ELECTRODE_COUNT).map(Electrode)
    }
}

/// A logical channel, the electrode index after [`ChannelOffset`] remapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Channel(u8);

impl Channel {
    /// Returns `None` for indices past the last channel.
    pub const fn new(index: u8) -> Option<Self> {
        if index < ELECTRODE_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    pub const fn index(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rotation applied when mapping electrodes to channels.
///
/// Any integer is accepted and normalized into `0..12`, so `-1` and `11`
/// configure the same offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelOffset(u8);

impl ChannelOffset {
    pub fn new(offset: i32) -> Self {
        Self(offset.rem_euclid(ELECTRODE_COUNT as i32) as u8)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// `(electrode + offset) mod 12`
    pub const fn remap(self, electrode: Electrode) -> Channel {
        Channel((electrode.0 + self.0) % ELECTRODE_COUNT)
    }
}

/// Snapshot of the 12 electrode touch bits. Bit `e` set means electrode `e`
/// is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchMask(u16);

impl TouchMask {
    pub const EMPTY: TouchMask = TouchMask(0);

    /// Bits above the 12 electrodes are discarded.
    pub const fn new(bits: u16) -> Self {
        Self(bits & TOUCH_MASK_BITS)
    }

    /// Builds the mask from the two touch status registers.
    pub const fn from_status(low: u8, high: u8) -> Self {
        Self::new(((high as u16) << 8) | low as u16)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn is_touched(self, electrode: Electrode) -> bool {
        self.0 & (1 << electrode.0) != 0
    }

    /// Electrodes whose state differs between `self` and `previous`.
    pub const fn changed(self, previous: TouchMask) -> TouchMask {
        TouchMask(self.0 ^ previous.0)
    }

    /// Set electrodes in ascending index order.
    pub fn electrodes(self) -> impl Iterator<Item = Electrode> {
        Electrode::all().filter(move |e| self.is_touched(*e))
    }
}
