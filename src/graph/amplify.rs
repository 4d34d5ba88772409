use crate::{
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Multiply a signal by a modulator, typically an envelope.
///
/// The modulator gates the result: once it reports inactive the product is
/// silent no matter what the signal is doing.
pub struct Amplify<N, M> {
    pub signal: N,
    pub modulator: M,
    temp_buffer: Vec<f32>,
}

impl<N, M> Amplify<N, M> {
    pub fn new(signal: N, modulator: M) -> Self {
        Self {
            signal,
            modulator,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<N: GraphNode, M: GraphNode> GraphNode for Amplify<N, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.signal.render_block(out, ctx);

        // Slice temp buffer to match output size (RT-safe, no allocation)
        let frames = &mut self.temp_buffer[..out.len()];
        frames.fill(0.0);
        self.modulator.render_block(frames, ctx);

        for (o, m) in out.iter_mut().zip(frames.iter()) {
            *o *= *m;
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.signal.note_on(ctx);
        self.modulator.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.signal.note_off(ctx);
        self.modulator.note_off(ctx);
    }

    fn get_envelope_level(&self) -> Option<f32> {
        self.modulator.get_envelope_level()
    }

    fn is_active(&self) -> bool {
        self.modulator.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{envelope::EnvNode, oscillator::OscNode};

    #[test]
    fn idle_envelope_silences_signal() {
        let ctx = RenderCtx::from_freq(48_000.0, 440.0, 1.0);
        let mut voice = Amplify::new(OscNode::square(), EnvNode::adsr(0.01, 0.1, 0.5, 0.1));
        let mut buffer = vec![0.0; 64];
        voice.render_block(&mut buffer, &ctx);

        assert!(buffer.iter().all(|&s| s == 0.0));
        assert!(!voice.is_active());
    }
}
