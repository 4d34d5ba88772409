use crate::sequencing::Pitch;

/// Context passed to graph nodes during rendering
///
/// - sample_rate: Audio sample rate (e.g., 48000.0)
/// - frequency: Pitch to render (Hz)
/// - velocity: Intensity, 0.0-1.0
pub struct RenderCtx {
    pub sample_rate: f32,
    pub frequency: f32,
    pub velocity: f32,
}

impl RenderCtx {
    /// Context for a sequenced pitch.
    pub fn from_pitch(sample_rate: f32, pitch: Pitch, velocity: f32) -> Self {
        Self::from_freq(sample_rate, pitch.frequency(), velocity)
    }

    /// Context for a direct frequency (unpitched and fixed-pitch voices).
    pub fn from_freq(sample_rate: f32, frequency: f32, velocity: f32) -> Self {
        Self {
            sample_rate,
            frequency,
            velocity,
        }
    }
}

/// Core trait for audio processing graph nodes
///
/// Nodes render audio block by block and respond to note events.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// Triggered when a note starts. Passthrough nodes ignore it.
    fn note_on(&mut self, _ctx: &RenderCtx) {}

    /// Triggered when a note is released. Passthrough nodes ignore it.
    fn note_off(&mut self, _ctx: &RenderCtx) {}

    fn get_envelope_level(&self) -> Option<f32> {
        None
    }

    /// Check if this node is still producing sound
    ///
    /// Used by voice management to know when a voice can be freed.
    fn is_active(&self) -> bool {
        true
    }
}
