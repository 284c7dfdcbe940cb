//! Tuneswipe - a terminal swipe deck for meeting people through music
//!
//! This crate provides the core functionality for the Tuneswipe application:
//! the spring-animated swipe card controller, the deck it walks through, and
//! the terminal front end that feeds it gestures.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod event_loop;
pub mod tui;

// Re-export primary types for convenience
pub use config::UserConfig;
pub use domain::{
    Candidate, Deck, DecisionLog, DecisionStatistics, GestureEvent, Profile, Resolution,
    SwipeCardController, SwipeConfig, SwipeDirection,
};
pub use error::{Result, TuneSwipeError};
pub use event_loop::{AppEvent, EventPump, InputSource, TerminalInput};
