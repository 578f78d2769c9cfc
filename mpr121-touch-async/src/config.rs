//! Bring-up and polling configuration.

use embassy_time::Duration;

use crate::error::ConfigError;

/// Default wait after reset and electrode configuration writes.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(5);

/// Default period of the touch mask poll.
pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_millis(50);

/// Default touch threshold applied to every electrode.
pub const DEFAULT_TOUCH_THRESHOLD: u8 = 12;

/// Default release threshold applied to every electrode.
pub const DEFAULT_RELEASE_THRESHOLD: u8 = 6;

/// Configuration of a [`TouchController`](crate::TouchController).
///
/// ```
/// use embassy_time::Duration;
/// use mpr121_touch_async::Config;
///
/// let config = Config::default()
///     .with_poll_period(Duration::from_millis(20))
///     .with_thresholds(10, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    settle_delay: Duration,
    poll_period: Duration,
    touch_threshold: u8,
    release_threshold: u8,
    debounce: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            poll_period: DEFAULT_POLL_PERIOD,
            touch_threshold: DEFAULT_TOUCH_THRESHOLD,
            release_threshold: DEFAULT_RELEASE_THRESHOLD,
            debounce: 0x00,
        }
    }
}

impl Config {
    /// Sets the wait after soft reset, electrode stop and electrode start.
    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    /// Sets the interval between two touch mask polls.
    pub fn with_poll_period(mut self, poll_period: Duration) -> Self {
        self.poll_period = poll_period;
        self
    }

    /// Sets the touch and release thresholds used for all 12 electrodes.
    pub fn with_thresholds(mut self, touch: u8, release: u8) -> Self {
        self.touch_threshold = touch;
        self.release_threshold = release;
        self
    }

    /// Sets the raw debounce register value (DR in bits 6:4, DT in bits 2:0).
    pub fn with_debounce(mut self, debounce: u8) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    pub fn poll_period(&self) -> Duration {
        self.poll_period
    }

    pub fn touch_threshold(&self) -> u8 {
        self.touch_threshold
    }

    pub fn release_threshold(&self) -> u8 {
        self.release_threshold
    }

    pub fn debounce(&self) -> u8 {
        self.debounce
    }

    /// Checks that the thresholds leave room for hysteresis.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.touch_threshold == 0 {
            return Err(ConfigError::ZeroTouchThreshold);
        }
        if self.release_threshold >= self.touch_threshold {
            return Err(ConfigError::NoHysteresis {
                touch: self.touch_threshold,
                release: self.release_threshold,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_recommended_bring_up() {
        let config = Config::default();
        assert_eq!(config.settle_delay(), Duration::from_millis(5));
        assert_eq!(config.poll_period(), Duration::from_millis(50));
        assert_eq!(config.touch_threshold(), 12);
        assert_eq!(config.release_threshold(), 6);
        assert_eq!(config.debounce(), 0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_thresholds_without_hysteresis() {
        let config = Config::default().with_thresholds(8, 8);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NoHysteresis {
                touch: 8,
                release: 8
            })
        );
        assert_eq!(
            Config::default().with_thresholds(0, 0).validate(),
            Err(ConfigError::ZeroTouchThreshold)
        );
    }
}
