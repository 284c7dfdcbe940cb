//! Drag-to-decide state machine for the top card of a [`Deck`].
//!
//! The controller consumes a gesture stream (`Start`, cumulative `Move`,
//! `End`, and `Cancel` for aborted gestures), publishes a [`CardFrame`] for
//! the presentation layer, and resolves every gesture into a commit or a
//! revert. Animations are advanced by an external clock through
//! [`SwipeCardController::tick`]; while one is in flight the controller
//! refuses new gestures and programmatic swipes.

use super::spring::{Spring, SpringParams};
use super::{Candidate, Deck, SwipeDirection};
use crate::error::{Result, TuneSwipeError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

/// Smallest viewport width accepted, in viewport units.
const MIN_VIEWPORT_WIDTH: f32 = 1.0;

/// Tunables for gesture classification and card motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Horizontal displacement, as a fraction of viewport width, beyond which
    /// a release commits.
    pub threshold_fraction: f32,
    /// `rotation_degrees = translate_x / rotation_divisor`
    pub rotation_divisor: f32,
    /// Fly-off target, in viewport widths.
    pub fly_off_factor: f32,
    pub stiffness: f32,
    pub commit_damping: f32,
    pub revert_damping: f32,
    /// Scale of the next card while the current one is at rest.
    pub next_scale_floor: f32,
    /// Horizontal travel, in viewport widths, over which the next card grows
    /// from the floor by one full unit of scale.
    pub next_scale_span: f32,
    pub rest_displacement: f32,
    pub rest_speed: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold_fraction: 0.25,
            rotation_divisor: 10.0,
            fly_off_factor: 1.5,
            stiffness: 100.0,
            commit_damping: 15.0,
            revert_damping: 10.0,
            next_scale_floor: 0.9,
            next_scale_span: 5.0,
            rest_displacement: 0.01,
            rest_speed: 2.0,
        }
    }
}

impl SwipeConfig {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("threshold fraction", self.threshold_fraction),
            ("rotation divisor", self.rotation_divisor),
            ("fly-off factor", self.fly_off_factor),
            ("stiffness", self.stiffness),
            ("commit damping", self.commit_damping),
            ("revert damping", self.revert_damping),
            ("next card scale floor", self.next_scale_floor),
            ("next card scale span", self.next_scale_span),
            ("rest displacement", self.rest_displacement),
            ("rest speed", self.rest_speed),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(TuneSwipeError::InvalidArgument(format!(
                    "{} must be a finite number (got {})",
                    name, value
                )));
            }
        }

        if !(self.threshold_fraction > 0.0 && self.threshold_fraction < 1.0) {
            return Err(TuneSwipeError::InvalidArgument(format!(
                "threshold fraction must be between 0 and 1 (got {})",
                self.threshold_fraction
            )));
        }
        if self.fly_off_factor <= 1.0 {
            return Err(TuneSwipeError::InvalidArgument(format!(
                "fly-off factor must move the card past the screen edge (got {})",
                self.fly_off_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.next_scale_floor) {
            return Err(TuneSwipeError::InvalidArgument(format!(
                "next card scale floor must be between 0 and 1 (got {})",
                self.next_scale_floor
            )));
        }

        let positive = [
            ("rotation divisor", self.rotation_divisor),
            ("stiffness", self.stiffness),
            ("commit damping", self.commit_damping),
            ("revert damping", self.revert_damping),
            ("next card scale span", self.next_scale_span),
            ("rest displacement", self.rest_displacement),
            ("rest speed", self.rest_speed),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(TuneSwipeError::InvalidArgument(format!(
                    "{} must be positive (got {})",
                    name, value
                )));
            }
        }

        Ok(())
    }

    fn spring_params(&self, damping: f32, overshoot_clamping: bool) -> SpringParams {
        SpringParams {
            stiffness: self.stiffness,
            damping,
            mass: 1.0,
            overshoot_clamping,
            rest_displacement: self.rest_displacement,
            rest_speed: self.rest_speed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    pub const ORIGIN: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Visual transform of the current card.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DerivedTransform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub rotation_degrees: f32,
}

impl DerivedTransform {
    pub const IDENTITY: DerivedTransform = DerivedTransform {
        translate_x: 0.0,
        translate_y: 0.0,
        rotation_degrees: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// Everything the presentation layer needs for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardFrame {
    pub transform: DerivedTransform,
    pub next_scale: f32,
    pub exhausted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Start,
    /// Cumulative translation since `Start`.
    Move { dx: f32, dy: f32 },
    End,
    /// The input system dropped the gesture without an `End`.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Commit(SwipeDirection),
    Revert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipePhase {
    Idle,
    Dragging,
    Animating(Resolution),
}

/// Receives one call per committed card, before the deck advances.
pub trait CommitListener<C> {
    fn on_commit(&mut self, direction: SwipeDirection, candidate: &C);
}

impl<C, F> CommitListener<C> for F
where
    F: FnMut(SwipeDirection, &C),
{
    fn on_commit(&mut self, direction: SwipeDirection, candidate: &C) {
        self(direction, candidate)
    }
}

/// Classifies a release at horizontal offset `x`. A release exactly on the
/// threshold reverts.
pub fn classify_release(x: f32, threshold: f32) -> Resolution {
    if x > threshold {
        Resolution::Commit(SwipeDirection::Right)
    } else if x < -threshold {
        Resolution::Commit(SwipeDirection::Left)
    } else {
        Resolution::Revert
    }
}

/// Scale of the card underneath, as a function of the top card's travel.
pub fn next_card_scale(translate_x: f32, viewport_width: f32, config: &SwipeConfig) -> f32 {
    let width = viewport_width.max(MIN_VIEWPORT_WIDTH);
    let grown = config.next_scale_floor + translate_x.abs() / (width * config.next_scale_span);
    grown.min(1.0)
}

#[derive(Debug, Clone)]
struct Settle {
    resolution: Resolution,
    x: Spring,
    y: Spring,
    rotation: Spring,
}

impl Settle {
    fn is_done(&self) -> bool {
        self.x.is_at_rest() && self.y.is_at_rest() && self.rotation.is_at_rest()
    }
}

#[derive(Debug, Clone)]
enum SwipeState {
    Idle,
    Dragging { start: Offset },
    Animating(Settle),
}

#[derive(Debug)]
pub struct SwipeCardController<C> {
    deck: Deck<C>,
    config: SwipeConfig,
    viewport_width: f32,
    offset: Offset,
    rotation: f32,
    state: SwipeState,
}

impl<C: Candidate> SwipeCardController<C> {
    pub fn new(deck: Deck<C>, config: SwipeConfig, viewport_width: f32) -> Self {
        Self {
            deck,
            config,
            viewport_width: viewport_width.max(MIN_VIEWPORT_WIDTH),
            offset: Offset::ORIGIN,
            rotation: 0.0,
            state: SwipeState::Idle,
        }
    }

    pub fn deck(&self) -> &Deck<C> {
        &self.deck
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn threshold(&self) -> f32 {
        self.config.threshold_fraction * self.viewport_width
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn phase(&self) -> SwipePhase {
        match &self.state {
            SwipeState::Idle => SwipePhase::Idle,
            SwipeState::Dragging { .. } => SwipePhase::Dragging,
            SwipeState::Animating(settle) => SwipePhase::Animating(settle.resolution),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.deck.is_exhausted()
    }

    pub fn transform(&self) -> DerivedTransform {
        DerivedTransform {
            translate_x: self.offset.x,
            translate_y: self.offset.y,
            rotation_degrees: self.rotation,
        }
    }

    pub fn next_scale(&self) -> f32 {
        next_card_scale(self.offset.x, self.viewport_width, &self.config)
    }

    pub fn frame(&self) -> CardFrame {
        CardFrame {
            transform: self.transform(),
            next_scale: self.next_scale(),
            exhausted: self.is_exhausted(),
        }
    }

    /// Direction the current drag would commit to if released now.
    pub fn pending_direction(&self) -> Option<SwipeDirection> {
        match classify_release(self.offset.x, self.threshold()) {
            Resolution::Commit(direction) => Some(direction),
            Resolution::Revert => None,
        }
    }

    /// Feeds one gesture phase. Returns whether the event changed state.
    pub fn handle(&mut self, event: GestureEvent) -> bool {
        match (&self.state, event) {
            (SwipeState::Idle, GestureEvent::Start) => {
                if self.deck.is_exhausted() {
                    trace!("gesture start ignored: deck exhausted");
                    return false;
                }
                trace!(index = self.deck.current_index(), "drag started");
                self.state = SwipeState::Dragging { start: self.offset };
                true
            }
            (SwipeState::Dragging { start }, GestureEvent::Move { dx, dy }) => {
                let start = *start;
                self.offset = Offset::new(start.x + dx, start.y + dy);
                self.rotation = self.offset.x / self.config.rotation_divisor;
                true
            }
            (SwipeState::Dragging { .. }, GestureEvent::End) => {
                let resolution = classify_release(self.offset.x, self.threshold());
                debug!(x = self.offset.x, ?resolution, "drag released");
                self.begin(resolution);
                true
            }
            (SwipeState::Dragging { .. }, GestureEvent::Cancel) => {
                debug!("drag cancelled, reverting");
                self.begin(Resolution::Revert);
                true
            }
            (_, event) => {
                trace!(?event, phase = ?self.phase(), "gesture event absorbed");
                false
            }
        }
    }

    /// Commits the current card without a drag. Only accepted while idle.
    pub fn swipe(&mut self, direction: SwipeDirection) -> bool {
        if !matches!(self.state, SwipeState::Idle) || self.deck.is_exhausted() {
            trace!(?direction, phase = ?self.phase(), "programmatic swipe rejected");
            return false;
        }
        debug!(?direction, index = self.deck.current_index(), "programmatic swipe");
        self.begin(Resolution::Commit(direction));
        true
    }

    /// Advances any in-flight animation by `dt`. When it completes, a commit
    /// is reported to `listener` and the deck advances; the finished
    /// resolution is returned exactly once.
    pub fn tick<L>(&mut self, dt: Duration, listener: &mut L) -> Option<Resolution>
    where
        L: CommitListener<C>,
    {
        let SwipeState::Animating(settle) = &mut self.state else {
            return None;
        };

        settle.x.step(dt);
        settle.y.step(dt);
        settle.rotation.step(dt);

        self.offset = Offset::new(settle.x.value(), settle.y.value());
        self.rotation = settle.rotation.value();

        if !settle.is_done() {
            return None;
        }

        let resolution = settle.resolution;
        if let Resolution::Commit(direction) = resolution {
            if let Some(candidate) = self.deck.current() {
                debug!(
                    direction = direction.label(),
                    id = candidate.id(),
                    "card committed"
                );
                listener.on_commit(direction, candidate);
            }
            self.deck.advance();
            debug!(
                current = self.deck.current_index(),
                next = self.deck.next_index(),
                exhausted = self.deck.is_exhausted(),
                "deck advanced"
            );
        }

        self.settle_at_origin();
        Some(resolution)
    }

    /// Restores cursors to the start of the deck, abandoning any animation.
    pub fn reset(&mut self) {
        debug!("deck reset");
        self.deck.reset();
        self.settle_at_origin();
    }

    /// Updates the viewport width. A fly-off in flight is re-aimed at the new
    /// screen edge.
    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width.max(MIN_VIEWPORT_WIDTH);
        let target = self.config.fly_off_factor * self.viewport_width;
        if let SwipeState::Animating(settle) = &mut self.state {
            if let Resolution::Commit(direction) = settle.resolution {
                settle.x.retarget(direction.sign() * target);
            }
        }
    }

    fn begin(&mut self, resolution: Resolution) {
        let settle = match resolution {
            Resolution::Commit(direction) => {
                let target = direction.sign() * self.config.fly_off_factor * self.viewport_width;
                let params = self.config.spring_params(self.config.commit_damping, true);
                Settle {
                    resolution,
                    x: Spring::new(self.offset.x, target, params),
                    y: Spring::hold(self.offset.y),
                    rotation: Spring::hold(self.rotation),
                }
            }
            Resolution::Revert => {
                let params = self.config.spring_params(self.config.revert_damping, false);
                Settle {
                    resolution,
                    x: Spring::new(self.offset.x, 0.0, params),
                    y: Spring::new(self.offset.y, 0.0, params),
                    rotation: Spring::new(self.rotation, 0.0, params),
                }
            }
        };
        self.state = SwipeState::Animating(settle);
    }

    fn settle_at_origin(&mut self) {
        self.offset = Offset::ORIGIN;
        self.rotation = 0.0;
        self.state = SwipeState::Idle;
    }
}
