//! Vision-training exercise sessions.
//!
//! A session moves `Idle -> Running -> Ended -> Idle`. Hits score
//! `base * (1 + combo * 0.1)`; the countdown ends the session at zero and
//! `finish` compares the score against the stored high score.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};

/// Built-in exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseKind {
    /// Click the swatch matching the prompt color.
    ColorMatch,
    /// Follow and click a drifting target.
    FocusTracker,
    /// Catch targets appearing at the edges while fixating the center.
    PeripheralVision,
    /// Jump between targets as fast as possible.
    SaccadeJump,
}

impl ExerciseKind {
    /// All exercises, in menu order.
    pub const ALL: [Self; 4] = [
        Self::ColorMatch,
        Self::FocusTracker,
        Self::PeripheralVision,
        Self::SaccadeJump,
    ];

    /// Identifier used as the high-score key.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::ColorMatch => "color-match",
            Self::FocusTracker => "focus-tracker",
            Self::PeripheralVision => "peripheral-vision",
            Self::SaccadeJump => "saccade-jump",
        }
    }

    /// Looks an exercise up by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnknownExercise`] for an unknown id.
    pub fn from_id(id: &str) -> DomainResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == id)
            .ok_or_else(|| DomainError::UnknownExercise(id.to_string()))
    }

    /// Points for a hit before the combo multiplier.
    #[must_use]
    pub const fn base_points(self) -> u64 {
        match self {
            Self::ColorMatch | Self::FocusTracker => 100,
            Self::PeripheralVision => 150,
            Self::SaccadeJump => 50,
        }
    }

    /// Session length in seconds.
    #[must_use]
    pub const fn duration_secs(self) -> u32 {
        match self {
            Self::ColorMatch | Self::PeripheralVision => 60,
            Self::FocusTracker => 45,
            Self::SaccadeJump => 30,
        }
    }

    /// Radius of spawned targets in pixels.
    #[must_use]
    pub const fn target_radius(self) -> f32 {
        match self {
            Self::ColorMatch => 40.0,
            Self::FocusTracker => 30.0,
            Self::PeripheralVision => 25.0,
            Self::SaccadeJump => 20.0,
        }
    }
}

/// What a miss does to the combo counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissPolicy {
    /// A miss resets the combo to zero.
    #[default]
    ResetCombo,
    /// Misses are counted but leave the combo alone.
    Ignore,
}

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Not started, or finished and recorded.
    #[default]
    Idle,
    /// Timer running, hits count.
    Running,
    /// Timer expired or ended early; waiting for the high-score check.
    Ended,
}

/// Points awarded for a hit at the given combo.
///
/// Computed in integer tenths and rounded half up so that
/// `points_for(100, 1) == 110` exactly.
#[must_use]
pub fn points_for(base_points: u64, combo_count: u32) -> u64 {
    base_points
        .saturating_mul(10 + u64::from(combo_count))
        .saturating_add(5)
        / 10
}

/// Result of a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// Exercise identifier.
    pub exercise_id: String,
    /// Final score of this run.
    pub score: u64,
    /// High score before this run.
    pub previous_high: Option<u64>,
    /// High score after this run.
    pub high_score: u64,
    /// Whether this run set a new high score.
    pub is_new_high: bool,
    /// Successful hits.
    pub hits: u32,
    /// Recorded misses.
    pub misses: u32,
}

/// A persisted best score for one exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    /// Best score.
    pub score: u64,
    /// When it was reached.
    pub achieved_at: DateTime<Utc>,
}

/// One play session of an exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseSession {
    exercise_id: String,
    run_id: Option<Uuid>,
    score: u64,
    combo_count: u32,
    time_remaining_seconds: u32,
    state: SessionState,
    miss_policy: MissPolicy,
    hits: u32,
    misses: u32,
}

impl ExerciseSession {
    /// Creates an idle session.
    #[must_use]
    pub fn new(exercise_id: impl Into<String>, miss_policy: MissPolicy) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            run_id: None,
            score: 0,
            combo_count: 0,
            time_remaining_seconds: 0,
            state: SessionState::Idle,
            miss_policy,
            hits: 0,
            misses: 0,
        }
    }

    /// Exercise identifier.
    #[must_use]
    pub fn exercise_id(&self) -> &str {
        &self.exercise_id
    }

    /// Identifier of the current run, set on start.
    #[must_use]
    pub const fn run_id(&self) -> Option<Uuid> {
        self.run_id
    }

    /// Current score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Consecutive hits.
    #[must_use]
    pub const fn combo_count(&self) -> u32 {
        self.combo_count
    }

    /// Seconds left on the timer.
    #[must_use]
    pub const fn time_remaining_seconds(&self) -> u32 {
        self.time_remaining_seconds
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Returns true while the timer runs.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        matches!(self.state, SessionState::Running)
    }

    /// Returns true once the session waits for `finish`.
    #[must_use]
    pub const fn is_ended(&self) -> bool {
        matches!(self.state, SessionState::Ended)
    }

    /// Starts a run, resetting score, combo and timer.
    ///
    /// A zero duration ends the run immediately.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SessionAlreadyRunning`] if a run is in progress.
    pub fn start(&mut self, duration_secs: u32) -> DomainResult<()> {
        if self.is_running() {
            return Err(DomainError::SessionAlreadyRunning(self.exercise_id.clone()));
        }
        self.run_id = Some(Uuid::now_v7());
        self.score = 0;
        self.combo_count = 0;
        self.hits = 0;
        self.misses = 0;
        self.time_remaining_seconds = duration_secs;
        self.state = if duration_secs == 0 {
            SessionState::Ended
        } else {
            SessionState::Running
        };
        Ok(())
    }

    /// Records a successful hit and returns the points awarded.
    ///
    /// Hits outside a running session award nothing.
    pub fn record_hit(&mut self, base_points: u64) -> u64 {
        if !self.is_running() {
            return 0;
        }
        let points = points_for(base_points, self.combo_count);
        self.score = self.score.saturating_add(points);
        self.combo_count = self.combo_count.saturating_add(1);
        self.hits = self.hits.saturating_add(1);
        points
    }

    /// Records a miss according to the session's [`MissPolicy`].
    pub fn record_miss(&mut self) {
        if !self.is_running() {
            return;
        }
        self.misses += 1;
        if self.miss_policy == MissPolicy::ResetCombo {
            self.combo_count = 0;
        }
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> SessionState {
        if self.is_running() {
            self.time_remaining_seconds = self.time_remaining_seconds.saturating_sub(1);
            if self.time_remaining_seconds == 0 {
                self.state = SessionState::Ended;
            }
        }
        self.state
    }

    /// Ends a running session before the timer expires.
    pub fn end_early(&mut self) -> bool {
        if self.is_running() {
            self.state = SessionState::Ended;
            true
        } else {
            false
        }
    }

    /// Compares the score against `previous_high` and returns to idle.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SessionNotEnded`] unless the session has ended.
    pub fn finish(&mut self, previous_high: Option<u64>) -> DomainResult<SessionOutcome> {
        if !self.is_ended() {
            return Err(DomainError::SessionNotEnded(self.exercise_id.clone()));
        }
        let is_new_high = previous_high.map_or(self.score > 0, |high| self.score > high);
        let high_score = previous_high.map_or(self.score, |high| high.max(self.score));
        self.state = SessionState::Idle;

        Ok(SessionOutcome {
            exercise_id: self.exercise_id.clone(),
            score: self.score,
            previous_high,
            high_score,
            is_new_high,
            hits: self.hits,
            misses: self.misses,
        })
    }
}

/// Play area in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Arena {
    /// Places a target uniformly at random, fully inside the arena when it
    /// fits.
    pub fn spawn_target<R: Rng + ?Sized>(&self, rng: &mut R, radius: f32) -> Target {
        Target {
            x: random_axis(rng, self.width, radius),
            y: random_axis(rng, self.height, radius),
            radius,
        }
    }
}

fn random_axis<R: Rng + ?Sized>(rng: &mut R, extent: f32, radius: f32) -> f32 {
    if extent <= radius * 2.0 {
        extent / 2.0
    } else {
        rng.random_range(radius..=extent - radius)
    }
}

/// A circular target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    /// Center x.
    pub x: f32,
    /// Center y.
    pub y: f32,
    /// Radius.
    pub radius: f32,
}

impl Target {
    /// Hit test.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let dx = x - self.x;
        let dy = y - self.y;
        dx.mul_add(dx, dy * dy) <= self.radius * self.radius
    }
}
