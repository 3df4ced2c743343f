//! Procedural tone synthesis for the draw cues.
//!
//! Tones are generated from oscillators with exponential gain envelopes and
//! mixed into the default output device through one shared context.

mod export;
mod mixer;
mod synthesis;
mod system;

// Re-export public types
pub use export::{export_tones, render_tones};
pub use mixer::Mixer;
pub use synthesis::{beep_frequency, beep_tone, oscillator, win_chord, Tone};
pub use system::{shared_context, AudioContext, SoundManager};

/// Audio cues emitted by the draw orchestrator
///
/// Implementations must not fail from the caller's point of view: a draw
/// proceeds whether or not sound comes out.
pub trait SoundCues {
    /// Make sure output is running; called from the user's start action
    fn resume(&mut self);

    /// Countdown beep for the given value
    fn beep(&mut self, count: u8);

    /// Win chord
    fn win(&mut self);
}
