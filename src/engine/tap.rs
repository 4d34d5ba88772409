//! Lock-free hand-off of master-bus samples to the visualiser.
//!
//! The audio side pushes with [`AnalyserTap::push_block`]; when the ring is
//! full the newest samples are dropped rather than blocking the callback.

use rtrb::{Consumer, Producer, RingBuffer};

/// One second of mono audio at 48 kHz.
pub const TAP_CAPACITY: usize = 48_000;

pub struct AnalyserTap {
    tx: Producer<f32>,
}

impl AnalyserTap {
    pub fn push_block(&mut self, samples: &[f32]) {
        for &sample in samples {
            if self.tx.push(sample).is_err() {
                break;
            }
        }
    }
}

/// Create the audio-side tap and the UI-side consumer.
pub fn analyser_channel(capacity: usize) -> (AnalyserTap, Consumer<f32>) {
    let (tx, rx) = RingBuffer::<f32>::new(capacity);
    (AnalyserTap { tx }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_cross_in_order() {
        let (mut tap, mut rx) = analyser_channel(8);
        tap.push_block(&[0.1, 0.2, 0.3]);
        assert_eq!(rx.pop(), Ok(0.1));
        assert_eq!(rx.pop(), Ok(0.2));
        assert_eq!(rx.pop(), Ok(0.3));
        assert!(rx.pop().is_err());
    }

    #[test]
    fn full_ring_drops_overflow() {
        let (mut tap, rx) = analyser_channel(4);
        tap.push_block(&[1.0; 10]);
        assert_eq!(rx.slots(), 4);
    }
}
