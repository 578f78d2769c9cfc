//! An asynchronous, `no_std` driver for the MPR121 12-channel capacitive touch controller.
//!
//! This driver provides a `TouchController` that brings the MPR121 up over I2C,
//! polls its touch status and turns every electrode change into a press or
//! release event for a logical channel. Channels can be rotated against the
//! physical electrodes with a channel offset, and the most recently pressed
//! channel is kept as queryable state.
//!
//! # Usage
//!
//! To use this driver, you need an I2C peripheral implementation that satisfies the
//! `embedded-hal-async::i2c::I2c` trait and an `embedded-hal-async::delay::DelayNs`
//! provider such as `embassy_time::Delay`.
//!
//! ```ignore
//! use embassy_time::Delay;
//! use mpr121_touch_async::{Config, TouchController};
//!
//! #[embassy_executor::task]
//! async fn read_touch(i2c: I2c<'static, esp_hal::Async>) {
//!     let mut touch = TouchController::new(i2c, Delay, Config::default());
//!     touch.set_channel_offset(4);
//!     touch
//!         .on_pressed(|channel| log::info!("Pressed {channel}"))
//!         .await
//!         .unwrap();
//!     touch
//!         .on_released(|channel| log::info!("Released {channel}"))
//!         .await
//!         .unwrap();
//!
//!     // Polls every 50 ms until the task is dropped.
//!     let _ = touch.run().await;
//! }
//! ```
//!
//! Events can also be queued for another task with a [`ChannelSink`] and
//! [`TouchController::with_sink`].

#![no_std]

extern crate alloc;

pub mod config;
pub mod controller;
pub mod error;
pub mod interface;
pub mod mask;
pub mod registers;
pub mod sink;

pub use config::Config;
pub use controller::{ElectrodeData, PollReport, TouchController};
pub use error::{ConfigError, Error};
pub use interface::{RegisterInterface, TouchStatus};
pub use mask::{Channel, ChannelOffset, Electrode, TouchMask};
pub use sink::{ChannelSink, Handlers, TouchEvent, TouchSink};
