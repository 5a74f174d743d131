use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use swatter_core::constants::FRAMES_PER_SECOND;
use swatter_core::{BugId, Session, SessionError, SessionPhase, SessionSnapshot};
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};

use crate::cancel::CancelToken;
use crate::sink::{FinalScore, ScoreSink};

#[derive(Clone, Copy, Debug)]
pub struct ControllerOptions {
    /// Redraw cadence for the movement pass.
    pub frame_period: Duration,
    /// Length of one countdown unit.
    pub time_unit: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            frame_period: Duration::from_micros(1_000_000 / u64::from(FRAMES_PER_SECOND)),
            time_unit: Duration::from_secs(1),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOutcome {
    pub final_score: FinalScore,
    pub submitted: bool,
    pub error: Option<String>,
}

/// Cloneable access to a live session for input and rendering.
///
/// Every access takes the session lock, so a click never interleaves with a
/// movement pass or a spawn.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    session: Arc<Mutex<Session>>,
}

impl SessionHandle {
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn click(&self, id: BugId) -> Option<i32> {
        self.lock().click(id)
    }

    pub fn phase(&self) -> SessionPhase {
        self.lock().phase()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().snapshot()
    }

    /// Runs `f` against the session under the lock.
    pub fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&*self.lock())
    }
}

/// Drives one session in real time.
///
/// Three tokio tasks share the session: the frame loop, the spawn timer and
/// the countdown. All of them stop on one [`CancelToken`], which fires when
/// the countdown ends the session or when the controller is torn down.
/// Must be created inside a tokio runtime.
pub struct SessionController {
    handle: SessionHandle,
    cancel: CancelToken,
    tasks: Vec<JoinHandle<()>>,
    player: String,
    sink: Arc<dyn ScoreSink>,
}

impl SessionController {
    pub fn launch(
        mut session: Session,
        player: impl Into<String>,
        options: ControllerOptions,
        sink: Arc<dyn ScoreSink>,
    ) -> Result<Self, SessionError> {
        session.start()?;
        let spawn_interval = session.profile().spawn_interval();
        let difficulty = session.difficulty();

        let handle = SessionHandle {
            session: Arc::new(Mutex::new(session)),
        };
        let cancel = CancelToken::new();

        let tasks = vec![
            spawn_ticker(
                "frame",
                handle.clone(),
                cancel.clone(),
                options.frame_period,
                MissedTickBehavior::Skip,
                Session::advance_frame,
            ),
            spawn_ticker(
                "spawn",
                handle.clone(),
                cancel.clone(),
                spawn_interval,
                MissedTickBehavior::Burst,
                |session| {
                    session.spawn_bug();
                },
            ),
            spawn_ticker(
                "countdown",
                handle.clone(),
                cancel.clone(),
                options.time_unit,
                MissedTickBehavior::Burst,
                |session| {
                    session.tick_clock();
                },
            ),
        ];

        let player = player.into();
        tracing::info!(player = %player, difficulty = %difficulty, "session started");

        Ok(Self {
            handle,
            cancel,
            tasks,
            player,
            sink,
        })
    }

    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    pub fn click(&self, id: BugId) -> Option<i32> {
        self.handle.click(id)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.handle.snapshot()
    }

    /// Waits for the countdown to end the session, stops the timers and hands
    /// the final score to the sink. A sink failure is logged and reported in
    /// the outcome; it never aborts the caller.
    pub async fn finish(mut self) -> Result<SessionOutcome, SessionError> {
        self.cancel.cancelled().await;
        self.stop_tasks().await;

        let (score, difficulty) = {
            let mut session = self.handle.lock();
            session.end();
            (session.take_final_score()?, session.difficulty())
        };

        let final_score = FinalScore {
            name: self.player.clone(),
            score,
            difficulty,
        };

        let submitted = self.sink.submit(&final_score).await;
        let outcome = match submitted {
            Ok(()) => {
                tracing::info!(
                    player = %final_score.name,
                    difficulty = %difficulty,
                    score,
                    "final score submitted"
                );
                SessionOutcome {
                    final_score,
                    submitted: true,
                    error: None,
                }
            }
            Err(err) => {
                tracing::warn!(
                    player = %final_score.name,
                    difficulty = %difficulty,
                    score,
                    "score submission failed: {err:#}"
                );
                SessionOutcome {
                    final_score,
                    submitted: false,
                    error: Some(format!("{err:#}")),
                }
            }
        };
        Ok(outcome)
    }

    /// Tears the session down without submitting. Returns the final view.
    pub async fn shutdown(mut self) -> SessionSnapshot {
        self.handle.lock().end();
        self.stop_tasks().await;
        tracing::info!(player = %self.player, "session torn down");
        self.handle.snapshot()
    }

    async fn stop_tasks(&mut self) {
        if self.cancel.cancel() {
            tracing::debug!("session timers cancelled");
        }
        for task in self.tasks.drain(..) {
            if let Err(err) = task.await {
                tracing::warn!("session task join failure: {err}");
            }
        }
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.cancel.cancel();
        for task in &self.tasks {
            task.abort();
        }
    }
}

fn spawn_ticker<F>(
    label: &'static str,
    handle: SessionHandle,
    cancel: CancelToken,
    period: Duration,
    missed: MissedTickBehavior,
    mut on_tick: F,
) -> JoinHandle<()>
where
    F: FnMut(&mut Session) + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(missed);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let running = {
                        let mut session = handle.lock();
                        if session.is_running() {
                            on_tick(&mut *session);
                        }
                        session.is_running()
                    };
                    if !running {
                        cancel.cancel();
                        break;
                    }
                }
            }
        }
        tracing::debug!(task = label, "session task stopped");
    })
}
