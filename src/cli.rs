// CLI module for argument parsing and configuration

use crate::domain::SwipeConfig;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

/// Default animation frame rate
pub const DEFAULT_FPS: u32 = 60;

/// Tuneswipe - music lovers, one card at a time
///
/// Drag a card right with the mouse (or press →) to like, left (or ←) to pass.
#[derive(Parser, Debug, Clone)]
#[command(name = "tuneswipe")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON file with the profiles to review
    ///
    /// If not specified, a built-in deck is used.
    #[arg(short = 'p', long = "profiles")]
    pub profiles: Option<PathBuf>,

    /// Drag distance needed to commit, as a fraction of the card area width
    #[arg(short = 't', long = "threshold")]
    pub threshold: Option<f32>,

    /// Spring damping of the fly-off animation
    #[arg(short = 'd', long = "damping")]
    pub damping: Option<f32>,

    /// Animation frames per second
    #[arg(long = "fps", default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Show the welcome screen even if it was shown before
    #[arg(long = "welcome", action = ArgAction::SetTrue)]
    pub show_welcome: bool,

    /// Write decisions as JSON to this file on exit
    #[arg(short = 'o', long = "export")]
    pub export: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate the arguments and return any errors
    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref path) = self.profiles {
            if !path.is_file() {
                return Err(format!("Profiles file does not exist: {}", path.display()));
            }
        }

        if let Some(threshold) = self.threshold {
            if !(threshold > 0.0 && threshold < 1.0) {
                return Err(format!(
                    "Invalid threshold: {}. Use a fraction between 0 and 1, like 0.25",
                    threshold
                ));
            }
        }

        if let Some(damping) = self.damping {
            if !(damping > 0.0 && damping.is_finite()) {
                return Err(format!("Invalid damping: {}. Must be positive", damping));
            }
        }

        if self.fps == 0 || self.fps > 240 {
            return Err(format!("Invalid fps: {}. Use a value from 1 to 240", self.fps));
        }

        Ok(())
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub profiles: Option<PathBuf>,
    pub threshold: Option<f32>,
    pub damping: Option<f32>,
    pub fps: u32,
    pub show_welcome: bool,
    pub export: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Interval between animation frames
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    /// Applies command-line overrides on top of `base`.
    pub fn swipe_config(&self, base: SwipeConfig) -> SwipeConfig {
        SwipeConfig {
            threshold_fraction: self.threshold.unwrap_or(base.threshold_fraction),
            commit_damping: self.damping.unwrap_or(base.commit_damping),
            ..base
        }
    }
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        AppConfig {
            profiles: args.profiles,
            threshold: args.threshold,
            damping: args.damping,
            fps: args.fps,
            show_welcome: args.show_welcome,
            export: args.export,
            log_file: args.log_file,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            profiles: None,
            threshold: None,
            damping: None,
            fps: DEFAULT_FPS,
            show_welcome: false,
            export: None,
            log_file: None,
        }
    }
}
