use crate::carrier::CarrierControl;
use crate::IrSender;

impl<C: CarrierControl> IrSender<C> {
    /// Emit a raw mark/space sequence modulated at `freq_khz`.
    ///
    /// `durations` holds microseconds: even indices are marks (carrier
    /// active), odd indices are spaces (carrier idle). Blocks the caller
    /// for the cumulative duration of the sequence; once started it runs
    /// to completion. The output is forced idle before returning, no
    /// matter how the sequence ends.
    pub fn send_raw(&mut self, durations: &[u32], freq_khz: u16) {
        self.carrier.configure(freq_khz);

        for (i, &duration_us) in durations.iter().enumerate() {
            if i & 1 == 1 {
                self.carrier.space(duration_us);
            } else {
                self.carrier.mark(duration_us);
            }
        }

        // always end with the LED off
        self.carrier.shutdown();
    }
}
