//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Units (pixels, seconds, Hz, etc.)
//! - Documented ranges and meanings
//! - Defaults matching the stock draw experience

mod audio;
mod confetti;
mod draw;
mod render;

// Re-export all types
pub use audio::{audio_constants, ToneParams, Waveform};
pub use confetti::{ConfettiParams, Rgba, CONFETTI_PALETTE};
pub use draw::DrawTiming;
pub use render::RenderConfig;
