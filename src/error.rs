//! Error types for configuration, audio and rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Startup configuration problems, reported before any window opens
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("participant list is empty")]
    NoParticipants,
    #[error("failed to read participants from {}: {source}", path.display())]
    ReadParticipants {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Audio device and synthesis failures
///
/// These never reach the user; the sound manager logs them and carries on
/// without sound.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device found")]
    NoDevice,
    #[error("failed to get audio config: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),
    #[error("failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),
    #[error("failed to start audio stream: {0}")]
    Play(#[from] cpal::PlayStreamError),
    #[error("audio thread exited before reporting readiness")]
    ThreadExited,
    #[error("failed to spawn audio thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("failed to write {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
}

/// Renderer initialization failures
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("failed to find suitable GPU adapter")]
    NoAdapter,
    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
