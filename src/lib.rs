//! Lucky Draw library - countdown raffle with confetti and synthesized cues

pub mod audio;
pub mod cli;
pub mod confetti;
pub mod draw;
pub mod error;
pub mod params;
pub mod participants;
pub mod rendering;
