//! Bring-up sequencing, touch mask polling and event dispatch.

use core::convert::Infallible;

use embassy_time::Ticker;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};
use heapless::Vec;
use log::{debug, error, trace, warn};

use crate::config::Config;
use crate::error::Error;
use crate::interface::RegisterInterface;
use crate::mask::{Channel, ChannelOffset, Electrode, TouchMask};
use crate::registers::{
    self, CONFIG1_VALUE, CONFIG2_VALUE, ECR_RUN_12, ECR_STOP, ELECTRODE_COUNT, FILTER_SETTINGS,
    REG_CONFIG1, REG_CONFIG2, REG_DEBOUNCE, REG_ELECTRODE_CONFIG, REG_SOFT_RESET, SOFT_RESET_CODE,
};
use crate::sink::{Handlers, TouchEvent, TouchSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Uninitialized,
    Active,
}

/// Outcome of a single poll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollReport {
    /// Dispatched events, in ascending electrode order.
    pub events: Vec<TouchEvent, 12>,
    /// How many of `events` the sink failed to accept.
    pub sink_failures: u8,
}

/// Diagnostic readings of one electrode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElectrodeData {
    /// Filtered measurement, 10 bits.
    pub filtered: u16,
    /// Tracked baseline, 10 bits with the two low bits always clear.
    pub baseline: u16,
}

/// A controller for the MPR121 capacitive touch sensor.
///
/// The device is brought up lazily: the first handler registration, poll
/// or call to [`run`](Self::run) performs the bring-up sequence once. A
/// failed bring-up leaves the controller uninitialized so the next call
/// tries again.
pub struct TouchController<
    I2cType: I2c<SevenBitAddress, Error = ErrorType>,
    ErrorType: embedded_hal_async::i2c::Error,
    D: DelayNs,
    S: TouchSink = Handlers,
> {
    regs: RegisterInterface<I2cType, ErrorType>,
    delay: D,
    sink: S,
    config: Config,
    state: State,
    previous: TouchMask,
    offset: ChannelOffset,
    touch_id: Option<Channel>,
}

impl<
        I2cType: I2c<SevenBitAddress, Error = ErrorType>,
        ErrorType: embedded_hal_async::i2c::Error,
        D: DelayNs,
    > TouchController<I2cType, ErrorType, D, Handlers>
{
    /// Creates a controller that dispatches to registered closures.
    ///
    /// # Arguments
    ///
    /// * `i2c` - An I2C peripheral that implements `embedded-hal-async::i2c::I2c`.
    /// * `delay` - Used for the settle waits of the bring-up sequence.
    /// * `config` - Thresholds and timings, see [`Config`].
    pub fn new(i2c: I2cType, delay: D, config: Config) -> Self {
        Self::with_sink(i2c, delay, config, Handlers::new())
    }

    /// Registers a press handler, bringing the device up first if needed.
    ///
    /// Handlers run in registration order with the remapped channel.
    pub async fn on_pressed(
        &mut self,
        handler: impl FnMut(Channel) + 'static,
    ) -> Result<(), Error<ErrorType>> {
        self.init().await?;
        self.sink.on_pressed(handler);
        Ok(())
    }

    /// Registers a release handler, bringing the device up first if needed.
    pub async fn on_released(
        &mut self,
        handler: impl FnMut(Channel) + 'static,
    ) -> Result<(), Error<ErrorType>> {
        self.init().await?;
        self.sink.on_released(handler);
        Ok(())
    }
}

impl<
        I2cType: I2c<SevenBitAddress, Error = ErrorType>,
        ErrorType: embedded_hal_async::i2c::Error,
        D: DelayNs,
        S: TouchSink,
    > TouchController<I2cType, ErrorType, D, S>
{
    /// Creates a controller that dispatches to `sink`.
    pub fn with_sink(i2c: I2cType, delay: D, config: Config, sink: S) -> Self {
        Self {
            regs: RegisterInterface::new(i2c),
            delay,
            sink,
            config,
            state: State::Uninitialized,
            previous: TouchMask::EMPTY,
            offset: ChannelOffset::default(),
            touch_id: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.state == State::Active
    }

    /// The channel most recently pressed and not yet released.
    pub fn touch_id(&self) -> Option<Channel> {
        self.touch_id
    }

    /// The mask seen by the last completed poll.
    pub fn previous_mask(&self) -> TouchMask {
        self.previous
    }

    /// Sets the electrode to channel rotation. Takes effect on the next poll.
    pub fn set_channel_offset(&mut self, offset: i32) {
        self.offset = ChannelOffset::new(offset);
        debug!("Channel offset set to {}", self.offset.get());
    }

    pub fn channel_offset(&self) -> ChannelOffset {
        self.offset
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the controller and gives back the bus, delay and sink.
    pub fn release(self) -> (I2cType, D, S) {
        (self.regs.release(), self.delay, self.sink)
    }

    /// Brings the device up. Does nothing once the device is running.
    ///
    /// Soft-resets the MPR121, stops the electrodes so the filter and
    /// threshold registers become writable, programs them, restarts all 12
    /// electrodes and captures the current mask as the poll baseline.
    pub async fn init(&mut self) -> Result<(), Error<ErrorType>> {
        if self.state == State::Active {
            return Ok(());
        }
        self.config.validate().map_err(|err| {
            error!("Refusing to start MPR121: {err:?}");
            Error::InvalidConfiguration(err)
        })?;

        debug!("Resetting MPR121");
        self.regs
            .write_register(REG_SOFT_RESET, SOFT_RESET_CODE)
            .await?;
        self.settle().await;
        self.regs
            .write_register(REG_ELECTRODE_CONFIG, ECR_STOP)
            .await?;
        self.settle().await;

        debug!("Programming filters and thresholds");
        for (reg, value) in FILTER_SETTINGS {
            self.regs.write_register(reg, value).await?;
        }
        self.regs
            .write_register(REG_DEBOUNCE, self.config.debounce())
            .await?;
        self.regs.write_register(REG_CONFIG1, CONFIG1_VALUE).await?;
        self.regs.write_register(REG_CONFIG2, CONFIG2_VALUE).await?;

        let touch = self.config.touch_threshold();
        let release = self.config.release_threshold();
        for k in 0..ELECTRODE_COUNT {
            self.regs
                .write_register(registers::touch_threshold(k), touch)
                .await?;
            self.regs
                .write_register(registers::release_threshold(k), release)
                .await?;
        }

        self.regs
            .write_register(REG_ELECTRODE_CONFIG, ECR_RUN_12)
            .await?;
        self.settle().await;

        self.previous = self.regs.read_touch_mask().await?;
        self.state = State::Active;
        debug!("MPR121 running, initial mask {:#05x}", self.previous.bits());
        Ok(())
    }

    /// Reads the touch mask once and dispatches an event per changed electrode.
    ///
    /// On a bus error nothing is dispatched and the previous mask is kept,
    /// so the change is picked up by the next successful poll.
    pub async fn poll(&mut self) -> Result<PollReport, Error<ErrorType>> {
        self.init().await?;
        let current = self.regs.read_touch_mask().await?;
        let changed = current.changed(self.previous);
        let mut report = PollReport::default();
        if changed.is_empty() {
            return Ok(report);
        }

        for electrode in changed.electrodes() {
            let channel = self.offset.remap(electrode);
            let event = if current.is_touched(electrode) {
                self.touch_id = Some(channel);
                TouchEvent::Pressed(channel)
            } else {
                if self.touch_id == Some(channel) {
                    self.touch_id = None;
                }
                TouchEvent::Released(channel)
            };
            trace!("Electrode {} -> {event:?}", electrode.index());
            if let Err(err) = self.sink.dispatch(event) {
                warn!("Touch sink rejected {event:?}: {err:?}");
                report.sink_failures += 1;
            }
            // At most 12 electrodes can change.
            let _ = report.events.push(event);
        }

        self.previous = current;
        Ok(report)
    }

    /// Brings the device up, then polls at the configured period forever.
    ///
    /// Only a failed bring-up returns. Bus errors while polling skip that
    /// tick.
    pub async fn run(&mut self) -> Result<Infallible, Error<ErrorType>> {
        self.init().await?;
        let mut ticker = Ticker::every(self.config.poll_period());
        loop {
            ticker.next().await;
            if let Err(err) = self.poll().await {
                warn!("Skipping touch poll: {err:?}");
            }
        }
    }

    /// Reads the filtered data and baseline of `electrode`.
    pub async fn electrode_data(
        &mut self,
        electrode: Electrode,
    ) -> Result<ElectrodeData, Error<ErrorType>> {
        let filtered = self.regs.read_filtered_data(electrode).await?;
        let baseline = self.regs.read_baseline(electrode).await?;
        Ok(ElectrodeData { filtered, baseline })
    }

    /// Whether the device has flagged an over-current condition on REXT.
    pub async fn over_current(&mut self) -> Result<bool, Error<ErrorType>> {
        Ok(self.regs.read_status().await?.over_current())
    }

    async fn settle(&mut self) {
        let micros = self.config.settle_delay().as_micros().min(u32::MAX as u64) as u32;
        self.delay.delay_us(micros).await;
    }
}
