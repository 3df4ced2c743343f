//! Offline rendering of the draw cues to WAV files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::mixer::Mixer;
use super::synthesis::{beep_tone, win_chord, Tone};
use crate::error::AudioError;
use crate::params::ToneParams;

/// Render tones through a fresh mixer until all of them have finished
pub fn render_tones(tones: impl IntoIterator<Item = Tone>, sample_rate: u32) -> Vec<f32> {
    let mut mixer = Mixer::new(sample_rate);
    mixer.resume();
    for tone in tones {
        mixer.schedule(tone);
    }
    mixer.render_to_end()
}

/// Write every countdown beep and the win chord into `dir`
///
/// Produces `beep_<n>.wav` for each countdown value and `win.wav`, as mono
/// 32-bit float. Returns the written paths in that order.
pub fn export_tones(
    dir: &Path,
    params: &ToneParams,
    sample_rate: u32,
) -> Result<Vec<PathBuf>, AudioError> {
    fs::create_dir_all(dir).map_err(|e| AudioError::Export {
        path: dir.to_path_buf(),
        source: hound::Error::IoError(e),
    })?;

    let mut written = Vec::new();

    for count in (1..=params.beep_reference_count).rev() {
        let path = dir.join(format!("beep_{}.wav", count));
        let samples = render_tones([beep_tone(params, count)], sample_rate);
        write_wav(&path, &samples, sample_rate)?;
        written.push(path);
    }

    let path = dir.join("win.wav");
    let samples = render_tones(win_chord(params), sample_rate);
    write_wav(&path, &samples, sample_rate)?;
    written.push(path);

    Ok(written)
}

fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<(), AudioError> {
    let wrap = |source| AudioError::Export {
        path: path.to_path_buf(),
        source,
    };

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec).map_err(wrap)?;
    for &sample in samples {
        writer.write_sample(sample).map_err(wrap)?;
    }
    writer.finalize().map_err(wrap)?;

    info!(path = %path.display(), samples = samples.len(), "Wrote tone");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_writes_all_cues() {
        let dir = tempfile::tempdir().unwrap();
        let params = ToneParams::default();

        let paths = export_tones(dir.path(), &params, 22_050).unwrap();
        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["beep_3.wav", "beep_2.wav", "beep_1.wav", "win.wav"]);

        let reader = hound::WavReader::open(&paths[0]).unwrap();
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.spec().sample_rate, 22_050);
        assert_eq!(reader.len() as usize, (0.3f64 * 22_050.0).round() as usize);

        let win = hound::WavReader::open(&paths[3]).unwrap();
        assert_eq!(win.len() as usize, (1.8f64 * 22_050.0).round() as usize);
    }

    #[test]
    fn test_export_into_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("tones").join("draw");

        let paths = export_tones(&nested, &ToneParams::default(), 8_000).unwrap();
        assert!(paths.iter().all(|p| p.starts_with(&nested) && p.exists()));
    }
}
