//! Carrier generation backends.
//!
//! One backend is picked per target at build time: software bit-banging
//! for cores fast enough to toggle GPIO at the carrier rate, timer-PWM
//! hijacking for classic parts (see [`crate::pwm`] behind the
//! `stm32f1xx` feature), and a loud stub for everything else.

use embedded_hal::digital::v2::OutputPin;

use crate::delay::wait_micros;
use crate::{MicrosClock, Polarity};

/// One IR carrier on one output pin.
///
/// A transmission calls `configure` once, then `mark`/`space` in
/// alternation, then [`CarrierControl::shutdown`]. After `space` and
/// `shutdown` the pin must sit at the idle level of the configured
/// [`Polarity`].
pub trait CarrierControl {
    /// Program the modulation frequency.
    ///
    /// Designed for 36-40 kHz and tolerant of the usual remote-control
    /// band (30-56 kHz). Far outside that band the period arithmetic may
    /// overflow or round to nothing; keeping the request reasonable is
    /// up to the caller.
    fn configure(&mut self, freq_khz: u16);

    /// Carrier active for `duration_us`. Zero switches the carrier on
    /// without holding.
    fn mark(&mut self, duration_us: u32);

    /// Carrier idle for `duration_us`. Zero switches the carrier off
    /// without holding.
    fn space(&mut self, duration_us: u32);

    /// Force the output to the idle level.
    fn shutdown(&mut self) {
        self.space(0);
    }
}

/// Software carrier for cores fast enough to bit-bang the modulation.
///
/// Marks toggle the pin at the configured half-period; the pin always
/// comes to rest at the idle level of the wiring [`Polarity`].
#[derive(Debug)]
pub struct BitBangCarrier<PIN, CLK> {
    pub pin: PIN,
    pub clock: CLK,
    pub polarity: Polarity,
    half_period_us: u32,
}

impl<ERR, PIN, CLK> BitBangCarrier<PIN, CLK>
where
    PIN: OutputPin<Error = ERR>,
    CLK: MicrosClock,
{
    pub fn new(pin: PIN, clock: CLK, polarity: Polarity) -> Self {
        Self {
            pin,
            clock,
            polarity,
            half_period_us: 0,
        }
    }

    fn drive_idle(&mut self) {
        if self.polarity.idle_is_high() {
            self.pin.set_high().ok();
        } else {
            self.pin.set_low().ok();
        }
    }
}

impl<ERR, PIN, CLK> CarrierControl for BitBangCarrier<PIN, CLK>
where
    PIN: OutputPin<Error = ERR>,
    CLK: MicrosClock,
{
    fn configure(&mut self, freq_khz: u16) {
        // half of one carrier cycle; T/2 in us with f in kHz
        self.half_period_us = 500 / u32::from(freq_khz);
        self.drive_idle();
    }

    fn mark(&mut self, duration_us: u32) {
        let begin = self.clock.now();
        while self.clock.now().wrapping_sub(begin) < duration_us {
            self.pin.set_high().ok();
            wait_micros(&mut self.clock, self.half_period_us);
            self.pin.set_low().ok();
            wait_micros(&mut self.clock, self.half_period_us);
        }
        // inverted boards rest high
        self.drive_idle();
    }

    fn space(&mut self, duration_us: u32) {
        self.drive_idle();
        wait_micros(&mut self.clock, duration_us);
    }
}

/// Stub for targets with no ported carrier path.
///
/// Every operation panics. A missing port must never look like a
/// successful transmission, so the failure happens at first use rather
/// than silently emitting nothing.
#[derive(Debug, Default)]
pub struct UnsupportedCarrier;

impl CarrierControl for UnsupportedCarrier {
    fn configure(&mut self, _freq_khz: u16) {
        unimplemented!("no IR carrier implementation for this target")
    }

    fn mark(&mut self, _duration_us: u32) {
        unimplemented!("no IR carrier implementation for this target")
    }

    fn space(&mut self, _duration_us: u32) {
        unimplemented!("no IR carrier implementation for this target")
    }
}
