mod dns;
mod orchestrator;
mod poll;
mod probe;
pub mod recovery;

pub use dns::{is_bad_dns, BAD_DNS};
pub use orchestrator::{
    CommandError, NetController, TransitionKind, TransitionReport, UsageError,
};
pub use poll::{poll_until, PollOutcome};
pub use probe::{run_probe, ProbeReport};
pub use recovery::{run_recovery, GiveUpReason, RecoveryOutcome, RecoveryReport};
