//! Session recording commands for CLI.

use clap::Subcommand;

use super::{open_planner, print_json, CliResult};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Record the minutes actually spent on a scheduled block
    Record {
        /// Time block ID
        block_id: String,
        /// Minutes actually spent
        #[arg(long)]
        minutes: u32,
    },
}

pub fn run(action: SessionAction) -> CliResult {
    let mut planner = open_planner()?;
    match action {
        SessionAction::Record { block_id, minutes } => {
            let block = planner.record_session(&block_id, minutes)?;
            print_json(&block)?;
        }
    }
    Ok(())
}
