use crate::{
    dsp::envelope::{Adsr, Envelope},
    graph::node::{GraphNode, RenderCtx},
};

/// ADSR envelope as a graph node. Used as the modulator of an `Amplify`, it
/// decides when a voice has gone silent.
pub struct EnvNode {
    env: Envelope,
}

impl EnvNode {
    pub fn new(shape: Adsr) -> Self {
        Self {
            env: Envelope::new(shape),
        }
    }

    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self::new(Adsr::new(attack, decay, sustain, release))
    }

    pub fn set_shape(&mut self, shape: Adsr) {
        self.env.set_shape(shape);
    }

    pub fn reset(&mut self) {
        self.env.reset();
    }
}

impl GraphNode for EnvNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.env.render(out, ctx);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.env.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.env.note_off(ctx);
    }

    fn get_envelope_level(&self) -> Option<f32> {
        Some(self.env.level())
    }

    fn is_active(&self) -> bool {
        self.env.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_until_triggered() {
        let ctx = RenderCtx::from_freq(1_000.0, 440.0, 1.0);
        let mut env = EnvNode::adsr(0.01, 0.01, 0.5, 0.01);
        let mut buffer = vec![1.0; 16];

        env.render_block(&mut buffer, &ctx);
        assert!(buffer.iter().all(|&s| s == 0.0));
        assert!(!env.is_active());

        env.note_on(&ctx);
        env.render_block(&mut buffer, &ctx);
        assert!(buffer[15] > 0.0);
        assert_eq!(env.get_envelope_level(), Some(buffer[15]));
    }
}
