use crate::{
    dsp::filter::{FilterMode, SVFilter},
    graph::node::{GraphNode, RenderCtx},
};

/// Optional tone filter in a voice chain. With no mode set the block passes
/// through untouched, so one patch layout serves filtered and plain voices.
pub struct FilterNode {
    filter: SVFilter,
    enabled: bool,
}

impl FilterNode {
    pub fn new(mode: Option<FilterMode>) -> Self {
        Self {
            filter: SVFilter::new(mode.unwrap_or(FilterMode::LowPass(20_000.0))),
            enabled: mode.is_some(),
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(Some(FilterMode::LowPass(cutoff_hz)))
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(Some(FilterMode::HighPass(cutoff_hz)))
    }

    pub fn bypass() -> Self {
        Self::new(None)
    }

    pub fn set_mode(&mut self, mode: Option<FilterMode>) {
        if let Some(mode) = mode {
            self.filter.set_mode(mode);
        }
        self.enabled = mode.is_some();
        self.filter.reset();
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        if self.enabled {
            self.filter.render(out, ctx);
        }
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.filter.reset();
    }
}
