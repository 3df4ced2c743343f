//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::error::ConfigError;
use crate::params::{ConfettiParams, DrawTiming, RenderConfig, ToneParams};
use crate::participants::ParticipantList;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "luckydraw")]
#[command(about = "Countdown raffle with confetti and synthesized cues", long_about = None)]
pub struct Args {
    /// Participant names; the built-in list is used when none are given
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,

    /// Read participants from a file, one name per line (# starts a comment)
    #[arg(long, value_name = "PATH", conflicts_with = "names")]
    pub participants_file: Option<PathBuf>,

    /// Window title
    #[arg(long, default_value = "Lucky Draw")]
    pub title: String,

    /// Seed for winner selection and confetti layout (random when omitted)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Countdown start value
    #[arg(long, value_name = "N", default_value = "3", value_parser = clap::value_parser!(u8).range(1..=9))]
    pub countdown: u8,

    /// Countdown tick period (milliseconds)
    #[arg(long, value_name = "MS", default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: u64,

    /// Number of confetti particles per reveal
    #[arg(long, value_name = "COUNT", default_value = "150")]
    pub particles: usize,

    /// Window width (pixels)
    #[arg(long, value_name = "PX", default_value = "1280")]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, value_name = "PX", default_value = "720")]
    pub height: u32,

    /// Run without opening the audio device
    #[arg(long)]
    pub mute: bool,

    /// Write the countdown beeps and win chord as WAV files to DIR and exit
    #[arg(long, value_name = "DIR")]
    pub export_tones: Option<PathBuf>,
}

impl Args {
    /// Resolve the participant list from the file, the positional names or
    /// the built-in default, in that order
    pub fn participants(&self) -> Result<ParticipantList, ConfigError> {
        if let Some(path) = &self.participants_file {
            return ParticipantList::from_file(path);
        }
        if self.names.is_empty() {
            return Ok(ParticipantList::default());
        }
        ParticipantList::new(self.names.iter().cloned())
    }

    pub fn draw_timing(&self) -> DrawTiming {
        DrawTiming {
            countdown_from: self.countdown,
            tick_interval_ms: self.interval_ms,
        }
    }

    /// The first countdown value always plays the base pitch
    pub fn tone_params(&self) -> ToneParams {
        ToneParams {
            beep_reference_count: self.countdown,
            ..ToneParams::default()
        }
    }

    pub fn confetti_params(&self) -> ConfettiParams {
        ConfettiParams {
            particle_count: self.particles,
            ..ConfettiParams::default()
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width,
            window_height: self.height,
            title: self.title.clone(),
            ..RenderConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_draw() {
        let args = Args::try_parse_from(["luckydraw"]).unwrap();
        let timing = args.draw_timing();
        assert_eq!(timing.countdown_from, 3);
        assert_eq!(timing.tick_interval_ms, 1000);
        assert_eq!(args.confetti_params().particle_count, 150);
        assert_eq!(args.tone_params().beep_reference_count, 3);
        assert_eq!(args.participants().unwrap(), ParticipantList::default());
        assert!(!args.mute);
    }

    #[test]
    fn test_positional_names() {
        let args = Args::try_parse_from(["luckydraw", "A", "B", "C"]).unwrap();
        let list = args.participants().unwrap();
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_blank_names_rejected() {
        let args = Args::try_parse_from(["luckydraw", " ", ""]).unwrap();
        assert!(matches!(
            args.participants(),
            Err(ConfigError::NoParticipants)
        ));
    }

    #[test]
    fn test_zero_countdown_rejected() {
        assert!(Args::try_parse_from(["luckydraw", "--countdown", "0"]).is_err());
        assert!(Args::try_parse_from(["luckydraw", "--interval-ms", "0"]).is_err());
    }

    #[test]
    fn test_file_and_names_conflict() {
        assert!(
            Args::try_parse_from(["luckydraw", "--participants-file", "x.txt", "A"]).is_err()
        );
    }

    #[test]
    fn test_overrides_flow_into_params() {
        let args = Args::try_parse_from([
            "luckydraw",
            "--countdown",
            "5",
            "--particles",
            "40",
            "--width",
            "800",
            "--title",
            "Raffle",
        ])
        .unwrap();
        assert_eq!(args.draw_timing().countdown_from, 5);
        assert_eq!(args.tone_params().beep_reference_count, 5);
        assert_eq!(args.confetti_params().particle_count, 40);
        let render = args.render_config();
        assert_eq!(render.window_width, 800);
        assert_eq!(render.window_height, 720);
        assert_eq!(render.title, "Raffle");
    }
}
