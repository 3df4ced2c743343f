//! Tone synthesis parameters for the countdown beep and win chord.

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

/// Countdown beep and win chord parameters
#[derive(Debug, Clone)]
pub struct ToneParams {
    /// Beep pitch at the first countdown value (Hz)
    pub beep_base_hz: f32,

    /// Pitch raise per elapsed countdown step (Hz)
    pub beep_step_hz: f32,

    /// Countdown value that plays at the base pitch
    pub beep_reference_count: u8,

    /// Beep length (seconds)
    pub beep_duration_s: f32,

    /// Win chord notes in onset order (Hz), C major arpeggio
    pub win_notes_hz: Vec<f32>,

    /// Delay between successive chord note onsets (seconds)
    pub win_stagger_s: f32,

    /// Length of each chord note from its own onset (seconds)
    pub win_note_duration_s: f32,

    /// Gain at tone onset
    pub peak_gain: f32,

    /// Gain reached at the end of the exponential decay
    pub floor_gain: f32,
}

impl Default for ToneParams {
    fn default() -> Self {
        Self {
            beep_base_hz: 440.0,
            beep_step_hz: 110.0,
            beep_reference_count: 3,
            beep_duration_s: 0.3,
            win_notes_hz: vec![523.25, 659.25, 783.99, 1046.50],
            win_stagger_s: 0.1,
            win_note_duration_s: 1.5,
            peak_gain: 0.1,
            floor_gain: 0.001,
        }
    }
}

/// Audio constants
pub mod audio_constants {
    /// Sample rate used for offline tone export (Hz)
    pub const EXPORT_SAMPLE_RATE: u32 = 44100;

    /// Hard clip applied to the mixed output to protect ears and speakers
    pub const OUTPUT_LIMIT: f32 = 0.5;
}
