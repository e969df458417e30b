//! Audit log CLI command

use crate::error::PesoResult;
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, count: usize) -> PesoResult<()> {
    let entries = storage.audit().read_recent(count)?;

    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    println!(
        "\nShowing {} of {} entries ({})",
        entries.len(),
        storage.audit().entry_count()?,
        storage.audit().path().display()
    );

    Ok(())
}
