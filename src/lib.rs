#![no_std]

//! Raw infrared transmission: a caller-supplied mark/space sequence in
//! microseconds is emitted on an output pin, modulated at a remote-control
//! carrier frequency (typically 36-40 kHz).

pub mod carrier;
mod delay;
mod transmitter;

#[cfg(feature = "stm32f1xx")]
pub mod pwm;

pub use carrier::{BitBangCarrier, CarrierControl, UnsupportedCarrier};
pub use delay::{wait_micros, WAIT_OVERHEAD_US};
#[cfg(feature = "stm32f1xx")]
pub use pwm::TimerPwmCarrier;

/// Board wiring of the IR LED: which pin level leaves the LED dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// LED off while the pin is low.
    Normal,
    /// LED off while the pin is high.
    Inverted,
}

impl Polarity {
    pub(crate) fn idle_is_high(self) -> bool {
        matches!(self, Polarity::Inverted)
    }
}

/// Free-running microsecond counter.
///
/// Monotonic up to the natural wraparound of `u32`; all waiting in this
/// crate is wrap-correct. Implement it over whatever the target has
/// (DWT cycle counter, a free-running TIM, `micros()` equivalents).
pub trait MicrosClock {
    fn now(&mut self) -> u32;
}

/// Sends raw pulse sequences through one carrier backend.
#[derive(Debug)]
pub struct IrSender<C> {
    pub carrier: C,
}

impl<C> IrSender<C> {
    pub fn new(carrier: C) -> Self {
        Self { carrier }
    }

    /// Give the carrier backend back, pin and clock included.
    pub fn release(self) -> C {
        self.carrier
    }
}
