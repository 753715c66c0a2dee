//! Hardware-PWM carrier for STM32F1 parts.
//!
//! TIM3 channel 3 drives PB0 in PWM mode. The timer keeps running at the
//! programmed carrier frequency for the whole transmission; marks
//! reconnect the compare output to the pin and spaces force it to its
//! inactive level, so mark/space switching never disturbs the period.

use stm32f1xx_hal::gpio::gpiob::PB0;
use stm32f1xx_hal::gpio::{Alternate, PushPull};
use stm32f1xx_hal::pac;

use crate::carrier::CarrierControl;
use crate::delay::wait_micros;
use crate::{MicrosClock, Polarity};

/// Timer-PWM carrier on TIM3 channel 3 / PB0.
///
/// Owns the timer and the pin for the lifetime of the sender, so nothing
/// else can reprogram them mid-waveform. `timer_clk_hz` is the TIM3
/// kernel clock (the APB1 timer clock after the RCC doubler).
pub struct TimerPwmCarrier<CLK> {
    pub timer: pac::TIM3,
    pub pin: PB0<Alternate<PushPull>>,
    pub clock: CLK,
    pub polarity: Polarity,
    timer_clk_hz: u32,
}

impl<CLK: MicrosClock> TimerPwmCarrier<CLK> {
    pub fn new(
        timer: pac::TIM3,
        pin: PB0<Alternate<PushPull>>,
        clock: CLK,
        polarity: Polarity,
        timer_clk_hz: u32,
    ) -> Self {
        Self {
            timer,
            pin,
            clock,
            polarity,
            timer_clk_hz,
        }
    }
}

impl<CLK: MicrosClock> CarrierControl for TimerPwmCarrier<CLK> {
    fn configure(&mut self, freq_khz: u16) {
        let rcc = unsafe { &(*pac::RCC::ptr()) };
        rcc.apb1enr.modify(|_, w| w.tim3en().set_bit());

        // a receiver capturing on this timer must not fire while it is
        // reprogrammed; whoever owns the receiver re-arms it afterwards
        self.timer.dier.reset();
        self.timer.cr1.reset();

        // no prescaling: carrier = timer_clk / (ARR + 1)
        let top = self.timer_clk_hz / (u32::from(freq_khz) * 1_000) - 1;
        self.timer.psc.write(|w| w.psc().bits(0));
        self.timer.arr.write(|w| w.arr().bits(top as u16));
        // ~1/3 duty cycle
        self.timer.ccr3.write(|w| w.ccr().bits((top / 3) as u16));

        // start disconnected: OC3 forced to its inactive level; CC3P
        // maps "inactive" onto the board's idle pin level
        self.timer
            .ccmr2_output()
            .modify(|_, w| w.oc3pe().set_bit().oc3m().force_inactive());
        self.timer
            .ccer
            .modify(|_, w| w.cc3e().set_bit().cc3p().bit(self.polarity.idle_is_high()));

        self.timer.egr.write(|w| w.ug().set_bit());
        self.timer.cr1.write(|w| w.cen().set_bit());
    }

    fn mark(&mut self, duration_us: u32) {
        self.timer
            .ccmr2_output()
            .modify(|_, w| w.oc3m().pwm_mode1());
        wait_micros(&mut self.clock, duration_us);
    }

    fn space(&mut self, duration_us: u32) {
        self.timer
            .ccmr2_output()
            .modify(|_, w| w.oc3m().force_inactive());
        wait_micros(&mut self.clock, duration_us);
    }
}
