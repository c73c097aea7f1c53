use super::state::RecoveryPhase;

pub(super) fn emit_recovery_event(
    from: RecoveryPhase,
    to: RecoveryPhase,
    trigger: &str,
    attempt: u8,
) {
    log::info!(
        "RECOVERY_EVENT {{\"from\":\"{}\",\"to\":\"{}\",\"trigger\":\"{}\",\"attempt\":{}}}",
        from.as_str(),
        to.as_str(),
        trigger,
        attempt
    );
}
