use crate::{
    db::{activities::Activities, projects::Projects},
    libs::{
        activity::Activity,
        config::Config,
        formatter::{format_time, parse_time, DATE_FORMAT},
        messages::Message,
        report::ProjectStore,
        tag::normalize_tags,
        visibility::Identity,
    },
    msg_bail_anyhow, msg_success,
};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ActivityArgs {
    #[command(subcommand)]
    command: ActivityCommand,
}

#[derive(Debug, Subcommand)]
enum ActivityCommand {
    #[command(about = "Record an activity")]
    Add {
        #[arg(short, long, help = "Project id")]
        project: i64,
        #[arg(short, long, help = "Start time, e.g. 9, 9:30 or 9,5")]
        start: String,
        #[arg(short, long, help = "End time, e.g. 17, 17:15 or 17,25")]
        end: String,
        #[arg(short, long, help = "Date as YYYY-MM-DD, defaults to today")]
        date: Option<String>,
        #[arg(short, long, value_delimiter = ',', help = "Tags, e.g. backend,review")]
        tag: Vec<String>,
        #[arg(default_value = "")]
        description: String,
    },
    #[command(about = "Change an activity")]
    Edit {
        id: i64,
        #[arg(short, long, help = "Project id")]
        project: Option<i64>,
        #[arg(short, long, help = "Start time")]
        start: Option<String>,
        #[arg(short, long, help = "End time")]
        end: Option<String>,
        #[arg(short, long, help = "Date as YYYY-MM-DD, defaults to the activity's date")]
        date: Option<String>,
        #[arg(short, long, value_delimiter = ',', help = "Replace the tags, \"\" clears them")]
        tag: Option<Vec<String>>,
        #[arg(long, help = "Replace the description")]
        description: Option<String>,
    },
    #[command(about = "Delete an activity")]
    Delete { id: i64 },
}

pub fn cmd(activity_args: ActivityArgs) -> Result<()> {
    let identity = Config::read()?.identity()?;
    let mut activities = Activities::new()?;

    match activity_args.command {
        ActivityCommand::Add {
            project,
            start,
            end,
            date,
            tag,
            description,
        } => {
            let date = match date {
                Some(date) => parse_date(&date)?,
                None => Utc::now().date_naive(),
            };
            let (start, end) = interval(date, &start, &end)?;
            ensure_project(&identity, project)?;

            let activity = Activity::new(start, end, &description, project).with_tags(normalize_tags(&tag)?);
            let id = activities.insert(&identity, &activity)?;
            msg_success!(Message::ActivityCreated(id));
        }
        ActivityCommand::Edit {
            id,
            project,
            start,
            end,
            date,
            tag,
            description,
        } => {
            let Some(mut activity) = activities.find_by_id(identity.organization_id, id)? else {
                msg_bail_anyhow!(Message::ActivityNotFound(id));
            };

            let date = match date {
                Some(date) => parse_date(&date)?,
                None => activity.start.date_naive(),
            };
            let start = start.unwrap_or_else(|| format_time(activity.start));
            let end = end.unwrap_or_else(|| format_time(activity.end));
            (activity.start, activity.end) = interval(date, &start, &end)?;

            if let Some(project) = project {
                ensure_project(&identity, project)?;
                activity.project_id = project;
            }
            // `--tag ""` clears the tags
            if let Some(tag) = tag {
                let tag: Vec<String> = tag.into_iter().filter(|t| !t.trim().is_empty()).collect();
                activity.tags = normalize_tags(&tag)?;
            }
            if let Some(description) = description {
                activity.description = description;
            }

            activities.update(&identity, &activity)?;
            msg_success!(Message::ActivityUpdated(id));
        }
        ActivityCommand::Delete { id } => {
            if activities.find_by_id(identity.organization_id, id)?.is_none() {
                msg_bail_anyhow!(Message::ActivityNotFound(id));
            }
            activities.delete(&identity, id)?;
            msg_success!(Message::ActivityDeleted(id));
        }
    }

    Ok(())
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).with_context(|| format!("invalid date '{}'", value))
}

fn interval(date: NaiveDate, start: &str, end: &str) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let start = date.and_time(parse_time(start)?).and_utc();
    let end = date.and_time(parse_time(end)?).and_utc();
    if end <= start {
        msg_bail_anyhow!(Message::ActivityEndsBeforeStart(format_time(start), format_time(end)));
    }
    Ok((start, end))
}

fn ensure_project(identity: &Identity, project: i64) -> Result<()> {
    if Projects::new()?.find_by_ids(identity.organization_id, &[project])?.is_empty() {
        msg_bail_anyhow!(Message::ActivityUnknownProject(project));
    }
    Ok(())
}
