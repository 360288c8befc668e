pub mod complete;
pub mod create;
pub mod export;
pub mod init;
pub mod list;
pub mod pause;
pub mod resume;
pub mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Start tracking a request against an SLA target")]
    Create(create::CreateArgs),
    #[command(about = "Pause the SLA clock for a request")]
    Pause(pause::PauseArgs),
    #[command(about = "Resume the SLA clock for a request")]
    Resume(resume::ResumeArgs),
    #[command(about = "Complete a request and record the verdict")]
    Complete(complete::CompleteArgs),
    #[command(about = "Show the computed SLA status for a request")]
    Status(status::StatusArgs),
    #[command(about = "List tracked requests")]
    List(list::ListArgs),
    #[command(about = "Export SLA records")]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Create(args) => create::cmd(args),
            Commands::Pause(args) => pause::cmd(args),
            Commands::Resume(args) => resume::cmd(args),
            Commands::Complete(args) => complete::cmd(args),
            Commands::Status(args) => status::cmd(args),
            Commands::List(args) => list::cmd(args),
            Commands::Export(args) => export::cmd(args),
        }
    }
}
