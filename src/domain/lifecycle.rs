use super::{EntryStatus, LedgerEntry, PreconditionError, require_persisted};

/// Move a stored entry to `to`.
///
/// Any status may follow any other, including leaving CANCELED. The caller is
/// responsible for persisting the returned entry.
pub fn transition(entry: LedgerEntry, to: EntryStatus) -> Result<LedgerEntry, PreconditionError> {
    require_persisted(&entry)?;
    Ok(entry.with_status(to))
}
