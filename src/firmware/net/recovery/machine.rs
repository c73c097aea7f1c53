use statig::prelude::*;

use super::events::RecoveryEvent;
use super::state::{GiveUpReason, RecoveryOutcome, RecoveryPhase};

#[derive(Clone, Copy, Debug)]
pub(super) struct RecoveryMachine {
    pub(super) phase: RecoveryPhase,
    pub(super) attempt: u8,
    pub(super) max_attempts: u8,
    pub(super) reset_cycles: u8,
    pub(super) outcome: Option<RecoveryOutcome>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DispatchStatus {
    Applied,
    Ignored,
}

#[derive(Clone, Copy, Debug)]
pub(super) struct DispatchContext {
    pub(super) status: DispatchStatus,
}

impl Default for DispatchContext {
    fn default() -> Self {
        Self {
            status: DispatchStatus::Ignored,
        }
    }
}

impl RecoveryMachine {
    pub(super) fn new(max_attempts: u8) -> Self {
        Self {
            phase: RecoveryPhase::Idle,
            attempt: 0,
            max_attempts: max_attempts.max(1),
            reset_cycles: 0,
            outcome: None,
        }
    }

    fn enter(&mut self, context: &mut DispatchContext, phase: RecoveryPhase) {
        self.phase = phase;
        context.status = DispatchStatus::Applied;
    }

    fn finish(&mut self, context: &mut DispatchContext, outcome: RecoveryOutcome) {
        self.outcome = Some(outcome);
        let phase = match outcome {
            RecoveryOutcome::Success => RecoveryPhase::Success,
            RecoveryOutcome::GaveUp(_) => RecoveryPhase::GaveUp,
        };
        self.enter(context, phase);
    }
}

#[state_machine(initial = "State::idle()")]
impl RecoveryMachine {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &RecoveryEvent) -> Outcome<State> {
        match event {
            RecoveryEvent::Begin { associated } => {
                self.attempt = 1;
                if *associated {
                    self.enter(context, RecoveryPhase::Checking);
                    Transition(State::checking())
                } else {
                    self.enter(context, RecoveryPhase::Connecting);
                    Transition(State::connecting())
                }
            }
            _ => ignored(context),
        }
    }

    #[state]
    fn connecting(
        &mut self,
        context: &mut DispatchContext,
        event: &RecoveryEvent,
    ) -> Outcome<State> {
        match event {
            RecoveryEvent::Associated => {
                self.enter(context, RecoveryPhase::Checking);
                Transition(State::checking())
            }
            RecoveryEvent::AssociationTimedOut { credentials_known } => {
                let reason = GiveUpReason::AssociationTimeout {
                    credentials_known: *credentials_known,
                };
                self.finish(context, RecoveryOutcome::GaveUp(reason));
                Transition(State::gave_up())
            }
            RecoveryEvent::DnsNotReported => {
                let reason = GiveUpReason::DnsNotReported;
                self.finish(context, RecoveryOutcome::GaveUp(reason));
                Transition(State::gave_up())
            }
            _ => ignored(context),
        }
    }

    #[state]
    fn checking(&mut self, context: &mut DispatchContext, event: &RecoveryEvent) -> Outcome<State> {
        match event {
            RecoveryEvent::DnsGood => {
                self.finish(context, RecoveryOutcome::Success);
                Transition(State::success())
            }
            RecoveryEvent::DnsBad => {
                self.enter(context, RecoveryPhase::Resetting);
                Transition(State::resetting())
            }
            _ => ignored(context),
        }
    }

    #[state]
    fn resetting(
        &mut self,
        context: &mut DispatchContext,
        event: &RecoveryEvent,
    ) -> Outcome<State> {
        match event {
            RecoveryEvent::DhcpRequested => {
                self.enter(context, RecoveryPhase::Disconnecting);
                Transition(State::disconnecting())
            }
            _ => ignored(context),
        }
    }

    #[state]
    fn disconnecting(
        &mut self,
        context: &mut DispatchContext,
        event: &RecoveryEvent,
    ) -> Outcome<State> {
        match event {
            RecoveryEvent::Disassociated => {
                self.enter(context, RecoveryPhase::ResettingAgain);
                Transition(State::resetting_again())
            }
            _ => ignored(context),
        }
    }

    #[state]
    fn resetting_again(
        &mut self,
        context: &mut DispatchContext,
        event: &RecoveryEvent,
    ) -> Outcome<State> {
        match event {
            RecoveryEvent::DhcpRequested => {
                self.reset_cycles = self.reset_cycles.saturating_add(1);
                if self.attempt >= self.max_attempts {
                    self.finish(context, RecoveryOutcome::GaveUp(GiveUpReason::Exhausted));
                    return Transition(State::gave_up());
                }
                self.attempt += 1;
                self.enter(context, RecoveryPhase::Connecting);
                Transition(State::connecting())
            }
            _ => ignored(context),
        }
    }

    #[state]
    fn success(&mut self, context: &mut DispatchContext, event: &RecoveryEvent) -> Outcome<State> {
        let _ = event;
        ignored(context)
    }

    #[state]
    fn gave_up(&mut self, context: &mut DispatchContext, event: &RecoveryEvent) -> Outcome<State> {
        let _ = event;
        ignored(context)
    }
}

fn ignored(context: &mut DispatchContext) -> Outcome<State> {
    context.status = DispatchStatus::Ignored;
    Handled
}
