//! Round scheduling and answer handling.
//!
//! One [`QuizEngine`] runs at most one round at a time. Rounds are started
//! by the cycle timer (or a command), end on the first correct answer or
//! when the round timer fires, and then the cycle is armed again.
//!
//! All state lives behind a single mutex. Timer tasks only hold a weak
//! reference to the engine and re-check the round id or cycle generation
//! they were armed with, so a stale firing is a no-op.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use rand::Rng;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::definition::{QuizDefinition, QuizType};
use super::messages::{self, Placeholders};
use super::validate;
use crate::config::{BannerConfig, QuizConfig};
use crate::host::{Host, Player, PlayerId};
use crate::{QuizError, Result};

/// What happened to a chat message passed to [`QuizEngine::on_chat_message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// No round was open.
    Ignored,
    /// The sender won the round.
    Correct,
    /// Wrong answer; the round stays open.
    Wrong,
}

/// Read-only view of the running round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSnapshot {
    pub id: u64,
    pub quiz_type: QuizType,
    /// Question text as configured.
    pub question: String,
    /// Text shown to players (the shuffled word for SCRAMBLE).
    pub displayed: String,
    /// The shuffled word, only for SCRAMBLE rounds.
    pub scrambled: Option<String>,
}

/// The open round.
#[derive(Debug)]
struct RoundState {
    id: u64,
    /// Configuration the round was started with; survives a reload.
    config: Arc<QuizConfig>,
    question: usize,
    displayed: String,
    scrambled: Option<String>,
}

impl RoundState {
    fn definition(&self) -> &QuizDefinition {
        &self.config.questions[self.question]
    }
}

#[derive(Debug)]
struct EngineState {
    config: Arc<QuizConfig>,
    round: Option<RoundState>,
    timeout_task: Option<JoinHandle<()>>,
    next_round_task: Option<JoinHandle<()>>,
    next_round_id: u64,
    /// Bumped whenever the next-round timer is cancelled or re-armed.
    cycle_generation: u64,
    /// Set once the cycle has been armed, cleared by [`QuizEngine::cancel`].
    cycling: bool,
}

impl EngineState {
    fn abort_timers(&mut self) {
        if let Some(task) = self.timeout_task.take() {
            task.abort();
        }
        if let Some(task) = self.next_round_task.take() {
            task.abort();
        }
        self.cycle_generation += 1;
    }
}

struct Inner {
    host: Host,
    runtime: Handle,
    state: Mutex<EngineState>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .abort_timers();
    }
}

/// Side effects of starting a round, performed after the lock is released.
struct RoundStart {
    config: Arc<QuizConfig>,
    definition: QuizDefinition,
    displayed: String,
    scrambled: String,
}

/// Side effects of a win.
struct RoundWin {
    config: Arc<QuizConfig>,
    definition: QuizDefinition,
    displayed: String,
}

/// The chat quiz engine.
///
/// Cloning is cheap; clones share the same state.
#[derive(Clone)]
pub struct QuizEngine {
    inner: Arc<Inner>,
}

impl QuizEngine {
    /// Create an idle engine.
    ///
    /// Must be called from within a tokio runtime; timers are spawned on it.
    pub fn new(config: QuizConfig, host: Host) -> Result<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| QuizError::Runtime(format!("quiz engine needs a tokio runtime: {e}")))?;

        Ok(Self {
            inner: Arc::new(Inner {
                host,
                runtime,
                state: Mutex::new(EngineState {
                    config: Arc::new(config),
                    round: None,
                    timeout_task: None,
                    next_round_task: None,
                    next_round_id: 1,
                    cycle_generation: 0,
                    cycling: false,
                }),
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn downgrade(&self) -> Weak<Inner> {
        Arc::downgrade(&self.inner)
    }

    fn upgrade(weak: &Weak<Inner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    /// Start automatic cycling.
    ///
    /// Any running round and pending timer is cancelled, then the next
    /// round is armed `intervalSecondsBeforeRound` from now.
    pub fn start_cycle(&self) {
        let mut state = self.lock();
        state.round = None;
        state.abort_timers();
        self.arm_next_round(&mut state);
    }

    /// Start a round immediately.
    ///
    /// Returns `false` when a round is already open or there are no questions.
    pub fn start_round(&self) -> bool {
        let start = {
            let mut state = self.lock();
            if state.round.is_some() {
                debug!("Round already active, not starting another");
                return false;
            }
            self.begin_round(&mut state)
        };

        match start {
            Some(start) => {
                self.announce_round(&start);
                true
            }
            None => false,
        }
    }

    /// Cancel whatever is running and start a new round right away.
    ///
    /// If no round can be started the cycle keeps running.
    pub fn force_start(&self) -> bool {
        let start = {
            let mut state = self.lock();
            if let Some(round) = state.round.take() {
                info!(round = round.id, "Quiz cancelled");
            }
            state.abort_timers();
            let start = self.begin_round(&mut state);
            if start.is_none() && state.cycling {
                self.arm_next_round(&mut state);
            }
            start
        };

        match start {
            Some(start) => {
                self.announce_round(&start);
                true
            }
            None => false,
        }
    }

    /// Stop the current round and all timers without scheduling another.
    ///
    /// Safe to call at any time, any number of times.
    pub fn cancel(&self) {
        let mut state = self.lock();
        if let Some(round) = state.round.take() {
            info!(round = round.id, "Quiz cancelled");
        }
        state.abort_timers();
        state.cycling = false;
    }

    /// Replace the configuration. A running round keeps the one it started with.
    ///
    /// A running cycle that had nothing to schedule is armed again.
    pub fn reload(&self, config: QuizConfig) {
        let mut state = self.lock();
        info!(questions = config.questions.len(), "Quiz configuration reloaded");
        state.config = Arc::new(config);

        if state.cycling
            && state.round.is_none()
            && state.next_round_task.is_none()
            && !state.config.questions.is_empty()
        {
            self.arm_next_round(&mut state);
        }
    }

    pub fn is_active(&self) -> bool {
        self.lock().round.is_some()
    }

    /// Snapshot of the running round, if any.
    pub fn current_round(&self) -> Option<RoundSnapshot> {
        let state = self.lock();
        state.round.as_ref().map(|round| {
            let definition = round.definition();
            RoundSnapshot {
                id: round.id,
                quiz_type: definition.quiz_type,
                question: definition.text.clone(),
                displayed: round.displayed.clone(),
                scrambled: round.scrambled.clone(),
            }
        })
    }

    /// Feed a chat message to the engine.
    pub fn on_chat_message(&self, sender: &Player, text: &str) -> AnswerOutcome {
        let mut state = self.lock();

        let Some(round) = state.round.as_ref() else {
            return AnswerOutcome::Ignored;
        };

        if !validate::is_correct(round.definition(), text) {
            let quiz_type = round.definition().quiz_type;
            let delay = state.config.wrong_answer_delay();
            drop(state);
            self.reply_later(sender.id.clone(), messages::wrong_answer_text(quiz_type), delay);
            return AnswerOutcome::Wrong;
        }

        let Some(round) = state.round.take() else {
            return AnswerOutcome::Ignored;
        };
        if let Some(task) = state.timeout_task.take() {
            task.abort();
        }
        let win = RoundWin {
            definition: round.definition().clone(),
            config: round.config,
            displayed: round.displayed,
        };
        info!(round = round.id, winner = %sender.name, "Quiz won");
        self.arm_next_round(&mut state);
        drop(state);

        self.celebrate(sender, &win);
        AnswerOutcome::Correct
    }

    /// Round timer callback.
    fn on_timeout(&self, round_id: u64) {
        let definition = {
            let mut state = self.lock();
            if state.round.as_ref().map(|round| round.id) != Some(round_id) {
                return;
            }
            let Some(round) = state.round.take() else {
                return;
            };
            state.timeout_task = None;
            self.arm_next_round(&mut state);
            round.definition().clone()
        };

        info!(round = round_id, "Quiz ended without a winner");
        let text = messages::timeout_text(&definition);
        self.inner
            .host
            .broadcaster
            .broadcast(&messages::format_message(&text));
    }

    /// Cycle timer callback.
    fn on_next_round(&self, generation: u64) {
        let start = {
            let mut state = self.lock();
            if state.cycle_generation != generation {
                return;
            }
            state.next_round_task = None;
            if state.round.is_some() {
                return;
            }
            self.begin_round(&mut state)
        };

        if let Some(start) = start {
            self.announce_round(&start);
        }
    }

    /// Arm the next-round timer, replacing any pending one.
    fn arm_next_round(&self, state: &mut EngineState) {
        if let Some(task) = state.next_round_task.take() {
            task.abort();
        }
        state.cycle_generation += 1;
        state.cycling = true;

        if state.config.questions.is_empty() {
            warn!("No quiz questions configured, not scheduling a round");
            return;
        }

        let generation = state.cycle_generation;
        let delay = state.config.interval();
        let weak = self.downgrade();
        debug!(delay_secs = delay.as_secs(), "Next quiz round scheduled");
        state.next_round_task = Some(self.inner.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(engine) = Self::upgrade(&weak) {
                engine.on_next_round(generation);
            }
        }));
    }

    /// Open a round under the lock and arm its timeout.
    fn begin_round(&self, state: &mut EngineState) -> Option<RoundStart> {
        let config = Arc::clone(&state.config);
        if config.questions.is_empty() {
            warn!("No quiz questions configured, cannot start a round");
            return None;
        }

        if let Some(task) = state.next_round_task.take() {
            task.abort();
        }
        state.cycle_generation += 1;

        let question = rand::rng().random_range(0..config.questions.len());
        let definition = config.questions[question].clone();

        let scrambled = match definition.quiz_type {
            QuizType::Scramble => Some(validate::scramble(
                definition.primary_answer().unwrap_or(&definition.text),
            )),
            QuizType::Quiz | QuizType::Type => None,
        };
        let displayed = scrambled.clone().unwrap_or_else(|| definition.text.clone());

        let id = state.next_round_id;
        state.next_round_id += 1;

        let delay = config.round_duration();
        let weak = self.downgrade();
        state.timeout_task = Some(self.inner.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(engine) = Self::upgrade(&weak) {
                engine.on_timeout(id);
            }
        }));

        state.round = Some(RoundState {
            id,
            config: Arc::clone(&config),
            question,
            displayed: displayed.clone(),
            scrambled: scrambled.clone(),
        });

        info!(round = id, quiz_type = %definition.quiz_type, question = %definition.text, "Quiz started");

        Some(RoundStart {
            config,
            definition,
            displayed,
            scrambled: scrambled.unwrap_or_default(),
        })
    }

    fn announce_round(&self, start: &RoundStart) {
        let placeholders = Placeholders::new(start.definition.quiz_type)
            .question(&start.displayed)
            .scrambled(&start.scrambled);

        let broadcaster = &self.inner.host.broadcaster;
        for line in &start.config.pre_round_message_lines {
            let line = messages::pre_round_line(line, &placeholders);
            broadcaster.broadcast(&messages::format_message(&line));
        }

        self.show_banner(&start.config.start_banner, &placeholders);
    }

    fn celebrate(&self, winner: &Player, win: &RoundWin) {
        let placeholders = Placeholders::new(win.definition.quiz_type)
            .player(&winner.name)
            .question(&win.displayed);

        let lines: Vec<String> = win
            .config
            .global_win_message_lines
            .iter()
            .map(|line| placeholders.apply(line))
            .collect();
        self.broadcast_later(lines, win.config.win_announcement_delay());

        self.show_banner(&win.config.win_banner, &placeholders);

        let commands = win
            .config
            .global_reward_commands
            .iter()
            .chain(&win.definition.reward_commands);
        for template in commands {
            let command = placeholders.apply(template);
            if let Err(e) = self.inner.host.commands.execute(&command) {
                warn!(command = %command, error = %e, "Reward command failed");
            }
        }
    }

    fn show_banner(&self, banner: &BannerConfig, placeholders: &Placeholders<'_>) {
        if !banner.active {
            return;
        }
        let title = messages::format_message(&placeholders.apply(&banner.title));
        let subtitle = messages::format_message(&placeholders.apply(&banner.subtitle));
        self.inner.host.show_banner_to_all(&title, &subtitle);
    }

    fn broadcast_later(&self, lines: Vec<String>, delay: Duration) {
        let host = self.inner.host.clone();
        self.inner.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            for line in &lines {
                host.broadcaster.broadcast(&messages::format_message(line));
            }
        });
    }

    fn reply_later(&self, player: PlayerId, text: &'static str, delay: Duration) {
        let host = self.inner.host.clone();
        self.inner.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            host.broadcaster
                .send_to(&player, &messages::format_message(text));
        });
    }
}
