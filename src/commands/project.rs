use crate::{
    db::projects::Projects,
    libs::{activity::Project, config::Config, messages::Message, view::View},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    command: ProjectCommand,
}

#[derive(Debug, Subcommand)]
enum ProjectCommand {
    #[command(about = "Create a project")]
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    #[command(about = "List projects of the organization")]
    List,
}

pub fn cmd(project_args: ProjectArgs) -> Result<()> {
    let identity = Config::read()?.identity()?;
    let mut projects = Projects::new()?;

    match project_args.command {
        ProjectCommand::Add { title, description } => {
            let id = projects.insert(identity.organization_id, &Project::new(&title, &description))?;
            msg_success!(Message::ProjectCreated(id, title));
        }
        ProjectCommand::List => {
            let list = projects.list(identity.organization_id)?;
            if list.is_empty() {
                msg_info!(Message::ProjectsNotFound);
            } else {
                View::projects(&list)?;
            }
        }
    }

    Ok(())
}
