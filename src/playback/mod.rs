//! Turning a composition into sound over time.
//!
//! A [`Player`] owns an [`AudioEngine`](crate::engine::AudioEngine) and runs
//! the Idle → Preparing → Playing state machine. Each play builds an
//! immutable [`PlaybackSession`] which the step callback reads from.

mod player;
mod session;

pub use player::{PlayRequest, Player, PlayerState};
pub use session::PlaybackSession;
