//! Reset command implementation

use anyhow::{bail, Result};

use speakdrill::config::Config;

/// Delete all stored progress: ledger, profile, review table, and the daily
/// challenge.
pub fn reset_command(config: &Config, force: bool) -> Result<()> {
    if !force {
        bail!("this deletes all progress; pass --force to confirm");
    }

    let engine = super::build_engine(config)?;
    engine.reset();
    println!("All progress deleted.");
    Ok(())
}
