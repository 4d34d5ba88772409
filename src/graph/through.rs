use crate::graph::node::{GraphNode, RenderCtx};

/*
Serial Signal Chain (Through)
=============================

Render the source into the output buffer, then let the effect process that
buffer in place.

  Through: [Source] ──→ [Effect] ──→ output

  Amplify: [Signal] ──┬──→ (×) ──→ output
           [Mod]    ──┘

A voice patch is a Through feeding an Amplify:

  OscNode ──→ FilterNode ──→ (× EnvNode)
*/

pub struct Through<S, F> {
    pub source: S,
    pub filter: F,
}

impl<S, F> Through<S, F> {
    pub fn new(source: S, filter: F) -> Self {
        Self { source, filter }
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.filter.render_block(out, ctx);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.source.note_on(ctx);
        self.filter.note_on(ctx);
    }

    fn note_off(&mut self, ctx: &RenderCtx) {
        self.source.note_off(ctx);
        self.filter.note_off(ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active() || self.filter.is_active()
    }

    fn get_envelope_level(&self) -> Option<f32> {
        self.source.get_envelope_level()
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{
        extensions::NodeExt, filter::FilterNode, node::GraphNode, node::RenderCtx,
        oscillator::OscNode,
    };

    #[test]
    fn bypassed_chain_matches_source() {
        let ctx = RenderCtx::from_freq(48_000.0, 440.0, 1.0);
        let mut plain = OscNode::sawtooth();
        let mut chained = OscNode::sawtooth().through(FilterNode::bypass());

        let mut a = vec![0.0; 128];
        let mut b = vec![0.0; 128];
        plain.render_block(&mut a, &ctx);
        chained.render_block(&mut b, &ctx);

        assert_eq!(a, b);
    }

    #[test]
    fn lowpass_softens_square_edges() {
        let ctx = RenderCtx::from_freq(48_000.0, 440.0, 1.0);
        let mut chained = OscNode::square().through(FilterNode::lowpass(100.0));
        let mut buffer = vec![0.0; 512];
        chained.render_block(&mut buffer, &ctx);

        let peak = buffer.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak < 0.9);
    }
}
