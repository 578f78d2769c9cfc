//! Error types for the MPR121 driver.

use core::fmt::{self, Debug};

/// A configuration that the device cannot be brought up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A touch threshold of zero would report every electrode as touched.
    ZeroTouchThreshold,
    /// The release threshold must be below the touch threshold to give hysteresis.
    NoHysteresis {
        /// Configured touch threshold.
        touch: u8,
        /// Configured release threshold.
        release: u8,
    },
}

/// The main error type for the MPR121 driver.
pub enum Error<E> {
    /// The bus reported a failed transfer.
    Transport(E),
    /// The supplied [`Config`](crate::Config) was rejected.
    InvalidConfiguration(ConfigError),
}

impl<E: Debug> Debug for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "Transport({err:?})"),
            Self::InvalidConfiguration(err) => write!(f, "InvalidConfiguration({err:?})"),
        }
    }
}

impl<E> From<ConfigError> for Error<E> {
    fn from(err: ConfigError) -> Self {
        Error::InvalidConfiguration(err)
    }
}
