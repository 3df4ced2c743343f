//! Sample-accurate voice scheduling and mixing.

use super::synthesis::{oscillator, Tone};
use crate::params::audio_constants::OUTPUT_LIMIT;

/// A tone placed on the mixer clock
#[derive(Debug)]
struct Voice {
    tone: Tone,
    start_frame: u64,
    end_frame: u64,
    /// Oscillator phase in cycles
    phase: f32,
}

/// Mono voice mixer with its own frame clock
///
/// A new mixer starts suspended: it outputs silence and its clock stands
/// still until `resume` is called.
#[derive(Debug)]
pub struct Mixer {
    sample_rate: u32,
    frame: u64,
    voices: Vec<Voice>,
    suspended: bool,
}

impl Mixer {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate.max(1),
            frame: 0,
            voices: Vec::new(),
            suspended: true,
        }
    }

    /// Seconds of audio rendered since the mixer was resumed
    pub fn current_time(&self) -> f64 {
        self.frame as f64 / f64::from(self.sample_rate)
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Start the clock; returns whether the mixer was suspended
    pub fn resume(&mut self) -> bool {
        std::mem::replace(&mut self.suspended, false)
    }

    /// Schedule a tone relative to the current clock position
    pub fn schedule(&mut self, tone: Tone) {
        let rate = f64::from(self.sample_rate);
        let start_frame = self.frame + (f64::from(tone.offset_s.max(0.0)) * rate).round() as u64;
        let end_frame = start_frame + (f64::from(tone.duration_s.max(0.0)) * rate).round() as u64;

        self.voices.push(Voice {
            tone,
            start_frame,
            end_frame,
            phase: 0.0,
        });
    }

    /// Voices that are sounding or waiting for their onset
    pub fn pending_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn is_idle(&self) -> bool {
        self.voices.is_empty()
    }

    /// Mix one sample and advance the clock
    pub fn next_sample(&mut self) -> f32 {
        if self.suspended {
            return 0.0;
        }

        let rate = self.sample_rate as f32;
        let frame = self.frame;
        let mut mixed = 0.0;

        for voice in &mut self.voices {
            if frame < voice.start_frame || frame >= voice.end_frame {
                continue;
            }
            let elapsed = (frame - voice.start_frame) as f32 / rate;
            mixed += oscillator(voice.tone.waveform, voice.phase) * voice.tone.gain_at(elapsed);
            voice.phase = (voice.phase + voice.tone.frequency_hz / rate).fract();
        }

        self.frame += 1;
        self.voices.retain(|voice| voice.end_frame > self.frame);

        mixed.clamp(-OUTPUT_LIMIT, OUTPUT_LIMIT)
    }

    /// Fill an interleaved buffer, writing the same sample to every channel
    pub fn render(&mut self, out: &mut [f32], channels: usize) {
        for frame in out.chunks_mut(channels.max(1)) {
            let sample = self.next_sample();
            frame.fill(sample);
        }
    }

    /// Render until every scheduled voice has finished
    pub fn render_to_end(&mut self) -> Vec<f32> {
        let mut samples = Vec::new();
        while !self.is_idle() {
            samples.push(self.next_sample());
            if self.suspended {
                break;
            }
        }
        samples
    }
}
