//! Tone definitions for the countdown beep and the win chord.

use std::f32::consts::TAU;

use crate::params::{ToneParams, Waveform};

/// One scheduled oscillator note with an exponential gain decay
#[derive(Debug, Clone, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub frequency_hz: f32,
    /// Onset relative to the moment the tone is scheduled (seconds)
    pub offset_s: f32,
    /// Time from onset until the oscillator stops (seconds)
    pub duration_s: f32,
    pub start_gain: f32,
    pub end_gain: f32,
}

impl Tone {
    /// Gain `t` seconds after onset
    ///
    /// Decays as `start * (end / start)^(t / duration)`, so it reaches
    /// `end_gain` exactly when the oscillator stops. Silent outside the note.
    pub fn gain_at(&self, t: f32) -> f32 {
        if t < 0.0 || t >= self.duration_s {
            return 0.0;
        }
        self.start_gain * (self.end_gain / self.start_gain).powf(t / self.duration_s)
    }
}

/// Oscillator output for a phase in cycles, `[0, 1)`
///
/// Both shapes start at zero and rise, so notes begin without a click.
pub fn oscillator(waveform: Waveform, phase: f32) -> f32 {
    match waveform {
        Waveform::Sine => (TAU * phase).sin(),
        Waveform::Triangle => {
            let p = (phase + 0.75).fract();
            4.0 * (p - 0.5).abs() - 1.0
        }
    }
}

/// Beep pitch for a countdown value; rises as the count falls
pub fn beep_frequency(params: &ToneParams, count: u8) -> f32 {
    let steps = f32::from(params.beep_reference_count) - f32::from(count);
    params.beep_base_hz + steps * params.beep_step_hz
}

pub fn beep_tone(params: &ToneParams, count: u8) -> Tone {
    Tone {
        waveform: Waveform::Sine,
        frequency_hz: beep_frequency(params, count),
        offset_s: 0.0,
        duration_s: params.beep_duration_s,
        start_gain: params.peak_gain,
        end_gain: params.floor_gain,
    }
}

/// Staggered triangle arpeggio; each note overlaps the next onset
pub fn win_chord(params: &ToneParams) -> Vec<Tone> {
    params
        .win_notes_hz
        .iter()
        .enumerate()
        .map(|(i, &frequency_hz)| Tone {
            waveform: Waveform::Triangle,
            frequency_hz,
            offset_s: i as f32 * params.win_stagger_s,
            duration_s: params.win_note_duration_s,
            start_gain: params.peak_gain,
            end_gain: params.floor_gain,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beep_pitch_rises_as_count_falls() {
        let params = ToneParams::default();
        assert!((beep_frequency(&params, 3) - 440.0).abs() < 1e-3);
        assert!((beep_frequency(&params, 2) - 550.0).abs() < 1e-3);
        assert!((beep_frequency(&params, 1) - 660.0).abs() < 1e-3);
    }

    #[test]
    fn test_beep_tone_shape() {
        let tone = beep_tone(&ToneParams::default(), 2);
        assert_eq!(tone.waveform, Waveform::Sine);
        assert_eq!(tone.offset_s, 0.0);
        assert!((tone.duration_s - 0.3).abs() < 1e-6);
        assert!((tone.gain_at(0.0) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_gain_decays_exponentially_to_floor() {
        let tone = beep_tone(&ToneParams::default(), 3);

        // Halfway through an exponential ramp is the geometric mean
        let mid = tone.gain_at(0.15);
        assert!((mid - (0.1f32 * 0.001).sqrt()).abs() < 1e-5);

        let near_end = tone.gain_at(0.3 - 1e-4);
        assert!((near_end - 0.001).abs() < 1e-4);
        assert_eq!(tone.gain_at(0.3), 0.0);
        assert_eq!(tone.gain_at(-0.01), 0.0);
    }

    #[test]
    fn test_win_chord_is_staggered_c_major() {
        let chord = win_chord(&ToneParams::default());
        let freqs: Vec<f32> = chord.iter().map(|t| t.frequency_hz).collect();
        assert_eq!(freqs, vec![523.25, 659.25, 783.99, 1046.50]);

        for (i, tone) in chord.iter().enumerate() {
            assert_eq!(tone.waveform, Waveform::Triangle);
            assert!((tone.offset_s - i as f32 * 0.1).abs() < 1e-6);
            assert!((tone.duration_s - 1.5).abs() < 1e-6);
        }

        // Each note is still sounding when the next one starts
        for pair in chord.windows(2) {
            assert!(pair[0].offset_s + pair[0].duration_s > pair[1].offset_s);
        }
    }

    #[test]
    fn test_oscillator_shapes() {
        for waveform in [Waveform::Sine, Waveform::Triangle] {
            assert!(oscillator(waveform, 0.0).abs() < 1e-6);
            assert!((oscillator(waveform, 0.25) - 1.0).abs() < 1e-6);
            assert!(oscillator(waveform, 0.5).abs() < 1e-5);
            assert!((oscillator(waveform, 0.75) + 1.0).abs() < 1e-5);
        }
        assert!((oscillator(Waveform::Triangle, 0.125) - 0.5).abs() < 1e-6);
    }
}
