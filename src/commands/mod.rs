pub mod activity;
pub mod init;
pub mod project;
pub mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage projects")]
    Project(project::ProjectArgs),
    #[command(about = "Record or delete activities")]
    Activity(activity::ActivityArgs),
    #[command(about = "Show activities and time totals of a period")]
    Report(report::ReportArgs),
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
            Commands::Project(args) => project::cmd(args),
            Commands::Activity(args) => activity::cmd(args),
            Commands::Report(args) => report::cmd(args),
        }
    }
}
