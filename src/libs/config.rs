//! Application configuration stored as `config.json` in the data directory.
//!
//! Two optional sections, each filled in interactively by `timebook init`:
//!
//! - **identity**: organization, username and roles used for every command,
//!   since there is no session
//! - **report**: page size of activity lists, batch size of full-window
//!   fetches and the timespan used when `report` is given none
//!
//! ```json
//! {
//!   "identity": { "organization_id": 1, "username": "alice", "roles": ["ROLE_USER"] },
//!   "report": { "page_size": 20, "batch_size": 500, "default_timespan": "week" }
//! }
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::visibility::{Identity, Role};
use crate::libs::window::Granularity;
use crate::{msg_bail_anyhow, msg_print};
use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IdentityConfig {
    pub organization_id: i64,
    pub username: String,
    pub roles: Vec<Role>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        IdentityConfig {
            organization_id: 1,
            username: String::new(),
            roles: vec![Role::User],
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReportConfig {
    pub page_size: u32,
    pub batch_size: u32,
    pub default_timespan: Granularity,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            page_size: 20,
            batch_size: 500,
            default_timespan: Granularity::Week,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<IdentityConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportConfig>,
}

impl Config {
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    /// Reads the configuration at `path`; a missing file yields the defaults.
    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str).with_context(|| Message::ConfigParseError.to_string())?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// The configured caller identity.
    pub fn identity(&self) -> Result<Identity> {
        match &self.identity {
            Some(identity) if !identity.username.trim().is_empty() => Ok(Identity::new(
                identity.organization_id,
                identity.username.trim(),
                identity.roles.clone(),
            )),
            _ => msg_bail_anyhow!(Message::ConfigMissingUsername),
        }
    }

    pub fn report_settings(&self) -> ReportConfig {
        self.report.clone().unwrap_or_default()
    }

    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = [
            ConfigModule {
                key: "identity".to_string(),
                name: Message::ConfigModuleIdentity.to_string(),
            },
            ConfigModule {
                key: "report".to_string(),
                name: Message::ConfigModuleReport.to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .defaults(&[true, false])
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "identity" => {
                    let default = config.identity.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleIdentity);

                    let organization_id: i64 = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptOrganization.to_string())
                        .default(default.organization_id)
                        .interact_text()?;
                    let username: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptUsername.to_string())
                        .default(default.username)
                        .interact_text()?;
                    let roles: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptRoles.to_string())
                        .default(default.roles.iter().map(Role::as_str).collect::<Vec<_>>().join(","))
                        .validate_with(|input: &String| parse_roles(input).map(|_| ()).map_err(|e| e.to_string()))
                        .interact_text()?;

                    config.identity = Some(IdentityConfig {
                        organization_id,
                        username,
                        roles: parse_roles(&roles)?,
                    });
                }
                "report" => {
                    let default = config.report.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleReport);

                    let page_size: u32 = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptPageSize.to_string())
                        .default(default.page_size)
                        .interact_text()?;
                    let batch_size: u32 = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptBatchSize.to_string())
                        .default(default.batch_size)
                        .interact_text()?;
                    let timespan: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptDefaultTimespan.to_string())
                        .default(default.default_timespan.to_string())
                        .validate_with(|input: &String| match input.parse::<Granularity>() {
                            Ok(Granularity::Custom) => Err("custom needs explicit dates".to_string()),
                            Ok(_) => Ok(()),
                            Err(e) => Err(e.to_string()),
                        })
                        .interact_text()?;

                    config.report = Some(ReportConfig {
                        page_size: page_size.max(1),
                        batch_size: batch_size.max(1),
                        default_timespan: timespan.parse()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}

/// Parses a comma separated role list such as `ROLE_USER,ROLE_ADMIN`.
pub fn parse_roles(value: &str) -> Result<Vec<Role>> {
    let mut roles = Vec::new();
    for part in value.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        let role: Role = part.parse()?;
        if !roles.contains(&role) {
            roles.push(role);
        }
    }
    if roles.is_empty() {
        roles.push(Role::User);
    }
    Ok(roles)
}
