//! Application configuration initialization command.
//!
//! Runs the interactive setup wizard for the business calendar, warning
//! thresholds, and SLA defaults.

use crate::{
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;

/// Command-line arguments for the initialization command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write the built-in defaults without prompting
    ///
    /// Useful for scripted setups and test environments where the standard
    /// Monday-Friday 9-17 calendar is what's wanted anyway.
    #[arg(short, long)]
    defaults: bool,
}

/// Executes the initialization command.
pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.defaults {
        let config = Config {
            business: Some(Default::default()),
            warning: Some(Default::default()),
            sla: Some(Default::default()),
        };
        config.save()?;
    } else {
        // Run interactive configuration wizard
        Config::init()?.save()?;
    }

    msg_success!(Message::ConfigSaved);
    Ok(())
}
