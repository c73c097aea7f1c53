use statig::blocking::IntoStateMachineExt as _;

use super::diag::emit_recovery_event;
use super::events::RecoveryEvent;
use super::machine::{DispatchContext, DispatchStatus, RecoveryMachine};
use super::state::{RecoveryPhase, RecoveryReport};
use crate::firmware::types::NetworkAddress;

pub(crate) struct RecoveryEngine {
    machine: statig::blocking::StateMachine<RecoveryMachine>,
}

impl RecoveryEngine {
    pub(crate) fn new(max_attempts: u8) -> Self {
        Self {
            machine: RecoveryMachine::new(max_attempts).state_machine(),
        }
    }

    pub(crate) fn phase(&self) -> RecoveryPhase {
        self.machine.inner().phase
    }

    pub(crate) fn attempt(&self) -> u8 {
        self.machine.inner().attempt
    }

    pub(crate) fn apply(&mut self, event: RecoveryEvent) -> DispatchStatus {
        let before = *self.machine.inner();
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&event, &mut context);
        let after = *self.machine.inner();

        if context.status == DispatchStatus::Applied {
            emit_recovery_event(before.phase, after.phase, event.as_str(), after.attempt);
            if after.attempt != before.attempt {
                log::info!(
                    "dns recovery: attempt #{} of {}",
                    after.attempt,
                    after.max_attempts
                );
            }
        } else {
            log::debug!(
                "dns recovery: ignored event={} phase={}",
                event.as_str(),
                before.phase.as_str()
            );
        }
        context.status
    }

    /// `None` until the machine has reached a terminal phase.
    pub(crate) fn report(&self, dns: NetworkAddress) -> Option<RecoveryReport> {
        let machine = self.machine.inner();
        machine.outcome.map(|outcome| RecoveryReport {
            outcome,
            attempts: machine.attempt,
            reset_cycles: machine.reset_cycles,
            dns,
        })
    }
}
