//! Process-wide audio context and the sound manager that plays draw cues.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::mpsc::{self, SyncSender};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;
use tracing::{debug, info, warn};

use super::mixer::Mixer;
use super::synthesis::{beep_tone, win_chord, Tone};
use super::SoundCues;
use crate::error::AudioError;
use crate::params::ToneParams;

/// Created on first use and kept for the rest of the process; `None` when
/// the device could not be opened.
static CONTEXT: OnceLock<Option<AudioContext>> = OnceLock::new();

/// Shared audio output: a mixer fed to the default output device
pub struct AudioContext {
    /// Shared with the device callback
    mixer: Arc<Mutex<Mixer>>,

    /// Owns the output stream and parks for the process lifetime
    _output_thread: thread::JoinHandle<()>,
}

type Ready = Result<Arc<Mutex<Mixer>>, AudioError>;

impl AudioContext {
    /// Open the default output device on a dedicated thread
    ///
    /// cpal streams cannot move between threads on every platform, so the
    /// stream lives and dies on the thread that built it.
    fn open() -> Result<Self, AudioError> {
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Ready>(1);

        let output_thread = thread::Builder::new()
            .name("luckydraw-audio".to_string())
            .spawn(move || run_output_thread(ready_tx))
            .map_err(AudioError::Spawn)?;

        let mixer = ready_rx.recv().map_err(|_| AudioError::ThreadExited)??;

        Ok(Self {
            mixer,
            _output_thread: output_thread,
        })
    }

    /// Start the mixer clock if it is still suspended
    pub fn resume(&self) {
        match self.mixer.lock() {
            Ok(mut mixer) => {
                if mixer.resume() {
                    info!("Audio context resumed");
                }
            }
            Err(_) => warn!("Audio mixer lock poisoned; resume skipped"),
        }
    }

    /// Schedule tones relative to the current mixer time
    pub fn play(&self, tones: impl IntoIterator<Item = Tone>) {
        match self.mixer.lock() {
            Ok(mut mixer) => {
                for tone in tones {
                    mixer.schedule(tone);
                }
                debug!(
                    voices = mixer.pending_voices(),
                    time_s = mixer.current_time(),
                    "Tones scheduled"
                );
            }
            Err(_) => warn!("Audio mixer lock poisoned; tones dropped"),
        }
    }
}

/// The shared context, opening the device on first call
///
/// Concurrent first calls block on the same initialization, so the device
/// is opened at most once.
pub fn shared_context() -> Option<&'static AudioContext> {
    CONTEXT
        .get_or_init(|| match AudioContext::open() {
            Ok(context) => Some(context),
            Err(e) => {
                warn!(error = %e, "Audio unavailable; continuing without sound");
                None
            }
        })
        .as_ref()
}

fn run_output_thread(ready: SyncSender<Ready>) {
    let (stream, mixer) = match open_stream() {
        Ok(parts) => parts,
        Err(e) => {
            let _ = ready.send(Err(e));
            return;
        }
    };

    if ready.send(Ok(mixer)).is_err() {
        return;
    }

    // Output stream (kept alive)
    let _stream = stream;
    loop {
        thread::park();
    }
}

fn open_stream() -> Result<(cpal::Stream, Arc<Mutex<Mixer>>), AudioError> {
    let host = cpal::default_host();
    let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
    let config = device.default_output_config()?;

    let sample_rate = config.sample_rate().0;
    let channels = usize::from(config.channels());
    info!(
        device = %device.name().unwrap_or_else(|_| "Unknown".to_string()),
        sample_rate,
        channels,
        "Audio output"
    );

    let mixer = Arc::new(Mutex::new(Mixer::new(sample_rate)));
    let callback_mixer = Arc::clone(&mixer);

    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| match callback_mixer.lock() {
            Ok(mut mixer) => mixer.render(data, channels),
            Err(_) => data.fill(0.0),
        },
        |err| warn!(error = %err, "Audio stream error"),
        None,
    )?;
    stream.play()?;

    Ok((stream, mixer))
}

/// Plays countdown beeps and the win chord through the shared context
///
/// Sound is best effort: when the device is missing or muted every cue is a
/// no-op and the draw carries on.
pub struct SoundManager {
    params: ToneParams,
    enabled: bool,
}

impl SoundManager {
    pub fn new(params: ToneParams) -> Self {
        Self {
            params,
            enabled: true,
        }
    }

    /// Never opens the audio device
    pub fn muted(params: ToneParams) -> Self {
        Self {
            params,
            enabled: false,
        }
    }

    /// Open the shared context on a background thread
    ///
    /// Until it finishes, the first cue waits for the device to open.
    pub fn prepare(&self) {
        if !self.enabled || CONTEXT.get().is_some() {
            return;
        }
        let spawned = thread::Builder::new()
            .name("luckydraw-audio-init".to_string())
            .spawn(|| {
                shared_context();
            });
        if let Err(e) = spawned {
            warn!(error = %e, "Failed to spawn audio init thread; opening on first cue");
        }
    }

    fn context(&self) -> Option<&'static AudioContext> {
        if !self.enabled {
            return None;
        }
        shared_context()
    }
}

impl SoundCues for SoundManager {
    /// Blocks on the device opening if `prepare` was never called or is
    /// still running
    fn resume(&mut self) {
        if let Some(context) = self.context() {
            context.resume();
        }
    }

    fn beep(&mut self, count: u8) {
        if let Some(context) = self.context() {
            context.play([beep_tone(&self.params, count)]);
        }
    }

    fn win(&mut self) {
        if let Some(context) = self.context() {
            context.play(win_chord(&self.params));
        }
    }
}
