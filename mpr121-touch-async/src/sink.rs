//! Destinations for press and release events.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::convert::Infallible;
use core::fmt::Debug;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel as EventQueue, TrySendError};

use crate::mask::Channel;

/// A change of a single channel observed by one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchEvent {
    /// The channel went from released to touched.
    Pressed(Channel),
    /// The channel went from touched to released.
    Released(Channel),
}

impl TouchEvent {
    pub fn channel(&self) -> Channel {
        match self {
            TouchEvent::Pressed(channel) | TouchEvent::Released(channel) => *channel,
        }
    }
}

/// Receives the events produced by a [`TouchController`](crate::TouchController).
///
/// A failing sink does not stop the poll: the controller logs the error and
/// carries on with the next changed electrode.
pub trait TouchSink {
    type Error: Debug;

    fn pressed(&mut self, channel: Channel) -> Result<(), Self::Error>;

    fn released(&mut self, channel: Channel) -> Result<(), Self::Error>;

    fn dispatch(&mut self, event: TouchEvent) -> Result<(), Self::Error> {
        match event {
            TouchEvent::Pressed(channel) => self.pressed(channel),
            TouchEvent::Released(channel) => self.released(channel),
        }
    }
}

type Handler = Box<dyn FnMut(Channel)>;

/// Ordered, append-only lists of press and release callbacks.
#[derive(Default)]
pub struct Handlers {
    pressed: Vec<Handler>,
    released: Vec<Handler>,
}

impl Handlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_pressed(&mut self, handler: impl FnMut(Channel) + 'static) {
        self.pressed.push(Box::new(handler));
    }

    pub fn on_released(&mut self, handler: impl FnMut(Channel) + 'static) {
        self.released.push(Box::new(handler));
    }

    pub fn pressed_count(&self) -> usize {
        self.pressed.len()
    }

    pub fn released_count(&self) -> usize {
        self.released.len()
    }
}

impl TouchSink for Handlers {
    type Error = Infallible;

    fn pressed(&mut self, channel: Channel) -> Result<(), Self::Error> {
        for handler in self.pressed.iter_mut() {
            handler(channel);
        }
        Ok(())
    }

    fn released(&mut self, channel: Channel) -> Result<(), Self::Error> {
        for handler in self.released.iter_mut() {
            handler(channel);
        }
        Ok(())
    }
}

/// Forwards events into an `embassy-sync` channel so another task can consume them.
///
/// The poll never waits on the queue; a full queue drops the event and is
/// reported as a sink failure.
pub struct ChannelSink<'a, M: RawMutex, const N: usize> {
    queue: &'a EventQueue<M, TouchEvent, N>,
}

impl<'a, M: RawMutex, const N: usize> ChannelSink<'a, M, N> {
    pub fn new(queue: &'a EventQueue<M, TouchEvent, N>) -> Self {
        Self { queue }
    }
}

impl<M: RawMutex, const N: usize> TouchSink for ChannelSink<'_, M, N> {
    type Error = TrySendError<TouchEvent>;

    fn pressed(&mut self, channel: Channel) -> Result<(), Self::Error> {
        self.queue.try_send(TouchEvent::Pressed(channel))
    }

    fn released(&mut self, channel: Channel) -> Result<(), Self::Error> {
        self.queue.try_send(TouchEvent::Released(channel))
    }
}
