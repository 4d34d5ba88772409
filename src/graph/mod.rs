//! Composable building blocks for voice patches.
//!
//! Graph nodes wrap the low-level DSP primitives with note events and
//! block-based rendering. `extensions` adds the fluent `.through()` and
//! `.amplify()` helpers used to assemble a patch.

/// Multiply a signal by a modulator (envelope gating).
pub mod amplify;
/// Envelope generator node exposing ADSR state.
pub mod envelope;
/// Fluent combinators (`.amplify()`, `.through()`).
pub mod extensions;
/// Optional tone filter node.
pub mod filter;
/// Core traits shared by all graph nodes.
pub mod node;
/// Audio-band oscillators and noise sources.
pub mod oscillator;
/// Serial chaining of two nodes (source → effect).
pub mod through;

pub use node::{GraphNode, RenderCtx};
