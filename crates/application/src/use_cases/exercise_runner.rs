//! Runs one vision-training exercise with a one-second countdown.

use std::sync::Arc;
use std::time::Duration;

use clearsight_domain::{
    Arena, ExerciseKind, ExerciseSession, HighScoreRecord, MissPolicy, SessionOutcome,
    SessionState, Target,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::ApplicationResult;
use crate::ports::{Clock, HighScoreStore};

struct Play {
    session: ExerciseSession,
    target: Option<Target>,
    rng: StdRng,
}

/// Result of a click in the arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickResult {
    /// The target was hit; a new one has been spawned.
    Hit {
        /// Points awarded.
        points: u64,
        /// The replacement target.
        next: Target,
    },
    /// The click missed the target.
    Miss,
    /// No session is running.
    Inactive,
}

/// Drives an [`ExerciseSession`]: spawns targets, scores clicks, ticks the
/// timer and records high scores when the session ends.
///
/// The countdown runs on its own task; dropping the runner cancels it.
pub struct ExerciseRunner<H, C> {
    kind: ExerciseKind,
    duration_secs: u32,
    arena: Arena,
    play: Arc<Mutex<Play>>,
    store: Arc<H>,
    clock: Arc<C>,
    ticker: Option<JoinHandle<()>>,
    outcome: Arc<watch::Sender<Option<SessionOutcome>>>,
}

impl<H, C> ExerciseRunner<H, C>
where
    H: HighScoreStore + 'static,
    C: Clock + 'static,
{
    /// Creates an idle runner for `kind`.
    pub fn new(kind: ExerciseKind, miss_policy: MissPolicy, store: Arc<H>, clock: Arc<C>) -> Self {
        let (outcome, _) = watch::channel(None);
        Self {
            kind,
            duration_secs: kind.duration_secs(),
            arena: Arena::default(),
            play: Arc::new(Mutex::new(Play {
                session: ExerciseSession::new(kind.id(), miss_policy),
                target: None,
                rng: StdRng::from_os_rng(),
            })),
            store,
            clock,
            ticker: None,
            outcome: Arc::new(outcome),
        }
    }

    /// Overrides the session length.
    #[must_use]
    pub const fn with_duration(mut self, duration_secs: u32) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    /// Overrides the play area.
    #[must_use]
    pub const fn with_arena(mut self, arena: Arena) -> Self {
        self.arena = arena;
        self
    }

    /// Uses a deterministic target sequence.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        if let Ok(mut play) = self.play.try_lock() {
            play.rng = StdRng::seed_from_u64(seed);
        }
        self
    }

    /// The exercise being played.
    pub const fn kind(&self) -> ExerciseKind {
        self.kind
    }

    /// Receives the outcome of each finished session.
    pub fn subscribe(&self) -> watch::Receiver<Option<SessionOutcome>> {
        self.outcome.subscribe()
    }

    /// A copy of the session state.
    pub async fn session(&self) -> ExerciseSession {
        self.play.lock().await.session.clone()
    }

    /// The current target, while running.
    pub async fn target(&self) -> Option<Target> {
        self.play.lock().await.target
    }

    /// Starts a session: resets score, combo and timer, spawns the first
    /// target and starts the countdown.
    ///
    /// Returns the first target, or `None` when a zero-length session ended
    /// at once.
    ///
    /// # Errors
    ///
    /// Returns an error if a session is already running.
    pub async fn start(&mut self) -> ApplicationResult<Option<Target>> {
        let (target, ended) = {
            let mut guard = self.play.lock().await;
            // a run that timed out is recorded before its score is reset
            finish_session(&mut guard, &*self.store, &*self.clock, &self.outcome).await;
            let play = &mut *guard;
            play.session.start(self.duration_secs)?;
            let target = self.arena.spawn_target(&mut play.rng, self.kind.target_radius());
            play.target = Some(target);
            (target, play.session.is_ended())
        };
        self.outcome.send_replace(None);

        if let Some(previous) = self.ticker.take() {
            previous.abort();
        }
        if ended {
            let mut play = self.play.lock().await;
            finish_session(&mut play, &*self.store, &*self.clock, &self.outcome).await;
            return Ok(None);
        }

        let play = Arc::clone(&self.play);
        let store = Arc::clone(&self.store);
        let clock = Arc::clone(&self.clock);
        let outcome = Arc::clone(&self.outcome);
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // the first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                let mut guard = play.lock().await;
                let state = guard.session.tick();
                match state {
                    SessionState::Running => {}
                    SessionState::Ended => {
                        finish_session(&mut guard, &*store, &*clock, &outcome).await;
                        break;
                    }
                    SessionState::Idle => break,
                }
            }
        }));
        Ok(Some(target))
    }

    /// Scores a click at `(x, y)` against the current target.
    pub async fn click(&self, x: f32, y: f32) -> ClickResult {
        let mut guard = self.play.lock().await;
        let play = &mut *guard;
        if !play.session.is_running() {
            return ClickResult::Inactive;
        }
        match play.target {
            Some(target) if target.contains(x, y) => {
                let points = play.session.record_hit(self.kind.base_points());
                let next = self
                    .arena
                    .spawn_target(&mut play.rng, self.kind.target_radius());
                play.target = Some(next);
                ClickResult::Hit { points, next }
            }
            _ => {
                play.session.record_miss();
                ClickResult::Miss
            }
        }
    }

    /// Ends the session before the timer runs out and records the result.
    ///
    /// Returns the outcome of the session, or `None` if none was played.
    pub async fn end_early(&mut self) -> Option<SessionOutcome> {
        let finished = {
            let mut play = self.play.lock().await;
            play.session.end_early();
            finish_session(&mut play, &*self.store, &*self.clock, &self.outcome).await
        };
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        finished.or_else(|| self.outcome.borrow().clone())
    }
}

impl<H, C> Drop for ExerciseRunner<H, C> {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

/// Runs the high-score check for an ended session while the caller holds
/// the play lock. Does nothing unless the session is `Ended`.
async fn finish_session<H: HighScoreStore, C: Clock>(
    play: &mut Play,
    store: &H,
    clock: &C,
    outcome: &watch::Sender<Option<SessionOutcome>>,
) -> Option<SessionOutcome> {
    if !play.session.is_ended() {
        return None;
    }
    let exercise_id = play.session.exercise_id().to_string();

    let previous = store.get(&exercise_id).await.unwrap_or_else(|error| {
        warn!(exercise = %exercise_id, %error, "high score unreadable");
        None
    });
    let result = match play.session.finish(previous.map(|record| record.score)) {
        Ok(result) => result,
        Err(error) => {
            warn!(exercise = %exercise_id, %error, "session could not finish");
            return None;
        }
    };
    play.target = None;

    if result.is_new_high {
        let record = HighScoreRecord {
            score: result.score,
            achieved_at: clock.now(),
        };
        if let Err(error) = store.put(&exercise_id, record).await {
            warn!(exercise = %exercise_id, %error, "high score not saved");
        }
    }

    info!(
        exercise = %exercise_id,
        score = result.score,
        high_score = result.high_score,
        new_high = result.is_new_high,
        "exercise session ended"
    );
    outcome.send_replace(Some(result.clone()));
    Some(result)
}
