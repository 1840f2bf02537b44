//! Turn Orchestrator use case
//!
//! Drives a single conversation session: manual request/reply exchanges and
//! the automatic battle loop. The session state lives in a
//! [`ConversationStore`] behind a mutex that is never held across a provider
//! call or the pacing delay, so `stop()` and mode changes always get through.
//!
//! The battle loop is explicit: [`TurnOrchestrator::step`] evaluates whether a
//! turn is due and produces at most one, [`TurnOrchestrator::run_battle`]
//! repeats it until the battle ends.

use crate::config::BattleConfig;
use crate::ports::chat_gateway::{ChatGateway, GatewayError};
use crate::ports::progress::{BattleProgressNotifier, NoProgress};
use arena_domain::{
    ConversationStore, ConverseRequest, DomainError, OrchestratorState, ParticipantAssignment,
    ProviderKind, SessionMode, Slot, StoreEvent, Transcript, Turn, next_speaker, preview,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, broadcast};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const EVENT_CAPACITY: usize = 256;

/// Errors returned by orchestrator operations
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Battle can only be started in battle mode")]
    NotInBattleMode,
}

/// Result of a user submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Manual mode: slot A answered
    Replied { reply: Turn },
    /// Manual mode: the reply arrived after the session was reset and was dropped
    Discarded,
    /// Battle mode: the topic was recorded and the battle flag raised;
    /// drive it with [`TurnOrchestrator::run_battle`]
    BattleStarted,
}

/// Result of one battle-loop evaluation
#[derive(Debug)]
pub enum StepOutcome {
    /// No turn is due (not in battle mode, battle inactive, or a call is
    /// already outstanding)
    NotDue,
    /// `slot` replied and the turn was appended
    Spoke { slot: Slot, turn: Turn },
    /// The battle was stopped during the pacing delay; no call was made
    Cancelled { slot: Slot },
    /// The reply arrived after the battle was stopped and was dropped
    Discarded { slot: Slot },
    /// The provider call failed; the battle is halted
    Halted { slot: Slot, error: GatewayError },
    /// The configured turn cap was reached; the battle is stopped
    TurnLimitReached,
}

/// Why a [`TurnOrchestrator::run_battle`] loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEnd {
    /// Stopped by the user, a mode switch, or a new session
    Stopped,
    /// `max_turns` provider turns were produced
    TurnLimit,
    /// A provider call failed
    Halted { slot: Slot, error: String },
}

/// Summary of a battle run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleSummary {
    pub turns: usize,
    pub end: BattleEnd,
}

/// Point-in-time copy of the session for display
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub transcript: Transcript,
    pub mode: SessionMode,
    pub participants: ParticipantAssignment,
    pub battle_active: bool,
    pub state: OrchestratorState,
}

struct Session {
    store: ConversationStore,
    state: OrchestratorState,
    /// Cancels the pacing wait of the current battle run
    cancel: CancellationToken,
    /// Bumped on every new session; manual replies for an older one are dropped
    generation: u64,
    /// Bumped whenever a battle starts or ends; steps from an older run
    /// leave the session untouched
    battle_run: u64,
    /// A provider call is outstanding
    in_flight: bool,
    /// Provider turns produced in the current battle run
    battle_turns: usize,
}

enum Prepared {
    NotDue,
    TurnLimit,
    Ready(PendingTurn),
}

struct PendingTurn {
    slot: Slot,
    provider: ProviderKind,
    request: ConverseRequest,
    cancel: CancellationToken,
    battle_run: u64,
}

/// Use case coordinating the conversation store, the speaker rule and the
/// chat gateway.
pub struct TurnOrchestrator<G: ChatGateway + 'static> {
    gateway: Arc<G>,
    config: Arc<BattleConfig>,
    session: Arc<Mutex<Session>>,
    events: broadcast::Sender<StoreEvent>,
    progress: Arc<dyn BattleProgressNotifier>,
}

impl<G: ChatGateway + 'static> Clone for TurnOrchestrator<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            config: Arc::clone(&self.config),
            session: Arc::clone(&self.session),
            events: self.events.clone(),
            progress: Arc::clone(&self.progress),
        }
    }
}

impl<G: ChatGateway + 'static> TurnOrchestrator<G> {
    pub fn new(gateway: Arc<G>, config: BattleConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let session = Session {
            store: ConversationStore::new(config.participants),
            state: OrchestratorState::Idle,
            cancel: CancellationToken::new(),
            generation: 0,
            battle_run: 0,
            in_flight: false,
            battle_turns: 0,
        };
        Self {
            gateway,
            config: Arc::new(config),
            session: Arc::new(Mutex::new(session)),
            events,
            progress: Arc::new(NoProgress),
        }
    }

    /// Set a progress notifier for battle callbacks
    pub fn with_progress(mut self, progress: Arc<dyn BattleProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    /// Receive every store mutation as it happens
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let session = self.session.lock().await;
        SessionSnapshot {
            transcript: session.store.transcript().clone(),
            mode: session.store.mode(),
            participants: session.store.participants(),
            battle_active: session.store.is_battle_active(),
            state: session.state,
        }
    }

    // ==================== Store mutations ====================

    /// Switch mode. Leaving battle mode ends the running battle and cuts any
    /// pacing wait short.
    pub async fn set_mode(&self, mode: SessionMode) {
        let mut session = self.session.lock().await;
        let was_active = session.store.is_battle_active();
        for event in session.store.set_mode(mode) {
            self.publish(event);
        }
        if mode == SessionMode::Manual && was_active {
            Self::end_battle_run(&mut session);
        }
        info!(mode = %mode, "Session mode changed");
    }

    pub async fn set_participant(&self, slot: Slot, provider: ProviderKind) {
        let mut session = self.session.lock().await;
        let event = session.store.set_participant(slot, provider);
        self.publish(event);
        info!(slot = %slot, provider = %provider, "Participant assigned");
    }

    /// Stop the battle from any state. An in-flight reply still completes
    /// but is dropped.
    pub async fn stop(&self) {
        let mut session = self.session.lock().await;
        let event = session.store.set_battle_active(false);
        self.publish(event);
        Self::end_battle_run(&mut session);
        info!("Battle stopped");
    }

    /// Start a fresh session: empty transcript, battle off.
    pub async fn new_session(&self) {
        let mut session = self.session.lock().await;
        Self::end_battle_run(&mut session);
        session.generation += 1;
        let event = session.store.reset();
        self.publish(event);
        session.state.resume();
        info!(generation = session.generation, "New session started");
    }

    /// Restart a stopped battle on the existing transcript.
    pub async fn start_battle(&self) -> Result<(), OrchestratorError> {
        let mut session = self.session.lock().await;
        if session.store.mode() != SessionMode::Battle {
            return Err(OrchestratorError::NotInBattleMode);
        }
        if session.store.transcript().is_empty() {
            return Err(DomainError::EmptyTurn.into());
        }
        if session.in_flight || session.state.is_awaiting_reply() {
            return Err(DomainError::TurnInFlight.into());
        }
        if !session.store.is_battle_active() {
            self.activate_battle(&mut session);
        }
        Ok(())
    }

    fn activate_battle(&self, session: &mut Session) {
        session.cancel = CancellationToken::new();
        session.battle_run += 1;
        session.battle_turns = 0;
        session.state.resume();
        let event = session.store.set_battle_active(true);
        self.publish(event);
        info!(
            a = %session.store.participants().a,
            b = %session.store.participants().b,
            "Battle started"
        );
    }

    fn end_battle_run(session: &mut Session) {
        session.state.stop();
        session.cancel.cancel();
        session.battle_run += 1;
        session.battle_turns = 0;
    }

    // ==================== User input ====================

    /// Record a user message and act on it according to the current mode.
    ///
    /// Manual mode asks slot A's provider for exactly one reply. Battle mode
    /// raises the battle flag; the caller then drives [`Self::run_battle`].
    pub async fn submit_user_message(
        &self,
        text: &str,
    ) -> Result<SubmitOutcome, OrchestratorError> {
        let turn = Turn::user(text)?;

        let (provider, request, generation) = {
            let mut session = self.session.lock().await;
            if session.in_flight || session.state.is_awaiting_reply() {
                return Err(DomainError::TurnInFlight.into());
            }

            let event = session.store.append_turn(turn);
            self.publish(event);

            if session.store.mode() == SessionMode::Battle {
                if !session.store.is_battle_active() {
                    self.activate_battle(&mut session);
                }
                return Ok(SubmitOutcome::BattleStarted);
            }

            session.state.resume();
            session.state.begin_turn()?;
            let provider = session.store.participants().provider_for(Slot::A);
            let Some(request) = ConverseRequest::for_speaker(session.store.transcript(), Slot::A)
            else {
                session.state.complete_turn();
                return Err(DomainError::EmptyTurn.into());
            };
            session.in_flight = true;
            (provider, request, session.generation)
        };

        debug!(
            provider = %provider,
            history = request.history.len(),
            "Sending manual turn"
        );
        let result = self.gateway.converse(provider, &request).await;

        let mut session = self.session.lock().await;
        session.in_flight = false;
        if session.generation != generation {
            debug!("Dropping manual reply for a previous session");
            return Ok(SubmitOutcome::Discarded);
        }
        session.state.complete_turn();
        match result {
            Ok(text) => {
                let reply = Turn::from_slot(Slot::A, provider, text);
                let event = session.store.append_turn(reply.clone());
                self.publish(event);
                Ok(SubmitOutcome::Replied { reply })
            }
            Err(e) => {
                warn!(provider = %provider, "Manual turn failed: {}", e);
                Err(e.into())
            }
        }
    }

    // ==================== Battle loop ====================

    /// Evaluate the battle once and produce at most one turn.
    pub async fn step(&self) -> Result<StepOutcome, OrchestratorError> {
        let pending = match self.prepare_turn().await? {
            Prepared::Ready(pending) => pending,
            Prepared::NotDue => return Ok(StepOutcome::NotDue),
            Prepared::TurnLimit => return Ok(StepOutcome::TurnLimitReached),
        };
        let PendingTurn {
            slot,
            provider,
            request,
            cancel,
            battle_run,
        } = pending;

        let pacing = self.config.pacing;
        if !pacing.is_zero() {
            self.progress.on_pacing(slot, pacing);
            debug!(slot = %slot, delay_ms = pacing.as_millis() as u64, "Pacing before battle turn");
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(pacing) => {}
            }
        }

        // Re-check the flag: it may have dropped while we slept.
        {
            let mut session = self.session.lock().await;
            let still_due = session.battle_run == battle_run && session.store.battle_due();
            if !still_due {
                if session.battle_run == battle_run {
                    session.state.complete_turn();
                }
                drop(session);
                self.progress.on_turn_abandoned(slot);
                return Ok(StepOutcome::Cancelled { slot });
            }
            session.in_flight = true;
        }

        self.progress.on_turn_start(slot, provider);
        info!(
            slot = %slot,
            provider = %provider,
            history = request.history.len(),
            "Requesting battle turn"
        );
        let result = self.gateway.converse(provider, &request).await;

        let mut session = self.session.lock().await;
        session.in_flight = false;
        if session.battle_run != battle_run || !session.store.battle_due() {
            debug!(slot = %slot, "Dropping reply that arrived after stop");
            drop(session);
            self.progress.on_turn_abandoned(slot);
            return Ok(StepOutcome::Discarded { slot });
        }
        session.state.complete_turn();
        match result {
            Ok(text) => {
                let turn = Turn::from_slot(slot, provider, text);
                debug!(slot = %slot, reply = %preview(turn.text(), 80), "Battle turn appended");
                let event = session.store.append_turn(turn.clone());
                self.publish(event);
                session.battle_turns += 1;
                drop(session);
                self.progress.on_turn_complete(slot, &turn);
                Ok(StepOutcome::Spoke { slot, turn })
            }
            Err(error) => {
                warn!(slot = %slot, provider = %provider, "Battle halted: {}", error);
                let event = session.store.set_battle_active(false);
                self.publish(event);
                session.state.fail();
                session.battle_run += 1;
                drop(session);
                self.progress.on_halted(slot, &error.to_string());
                Ok(StepOutcome::Halted { slot, error })
            }
        }
    }

    /// Run battle turns until the battle stops, fails, or hits the turn cap.
    pub async fn run_battle(&self) -> BattleSummary {
        let mut turns = 0;
        loop {
            let end = match self.step().await {
                Ok(StepOutcome::Spoke { .. }) => {
                    turns += 1;
                    continue;
                }
                Ok(StepOutcome::TurnLimitReached) => BattleEnd::TurnLimit,
                Ok(StepOutcome::Halted { slot, error }) => BattleEnd::Halted {
                    slot,
                    error: error.to_string(),
                },
                Ok(StepOutcome::NotDue)
                | Ok(StepOutcome::Cancelled { .. })
                | Ok(StepOutcome::Discarded { .. }) => BattleEnd::Stopped,
                Err(e) => {
                    warn!("Battle loop ended: {}", e);
                    BattleEnd::Stopped
                }
            };
            info!(turns, end = ?end, "Battle run finished");
            return BattleSummary { turns, end };
        }
    }

    /// Decide whether a battle turn is due and claim the in-flight guard.
    async fn prepare_turn(&self) -> Result<Prepared, OrchestratorError> {
        let mut session = self.session.lock().await;
        if !session.store.battle_due() || !session.state.is_idle() || session.in_flight {
            return Ok(Prepared::NotDue);
        }

        if let Some(max) = self.config.max_turns
            && session.battle_turns >= max
        {
            info!(turns = session.battle_turns, "Battle turn limit reached");
            let event = session.store.set_battle_active(false);
            self.publish(event);
            Self::end_battle_run(&mut session);
            return Ok(Prepared::TurnLimit);
        }

        let participants = session.store.participants();
        let Some(slot) = next_speaker(session.store.transcript(), &participants) else {
            return Ok(Prepared::NotDue);
        };
        let Some(request) = ConverseRequest::for_speaker(session.store.transcript(), slot) else {
            return Ok(Prepared::NotDue);
        };
        let request = request.with_system_instruction(self.config.system_instruction.clone());

        session.state.begin_turn()?;
        Ok(Prepared::Ready(PendingTurn {
            slot,
            provider: participants.provider_for(slot),
            request,
            cancel: session.cancel.clone(),
            battle_run: session.battle_run,
        }))
    }

    fn publish(&self, event: StoreEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}
