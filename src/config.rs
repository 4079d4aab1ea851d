// src/config.rs
use std::{env, fs, path::PathBuf, str::FromStr};
use thiserror::Error;

use crate::domain::slug::{SlugConfiguration, WorkspaceId};

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    slug_config_path: PathBuf,
    workspace_id: Option<WorkspaceId>,
    populate_limit: Option<usize>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_database_url() -> String {
    "sqlite://cms.db?mode=rwc".into()
}

fn optional_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    env::var(name)
        .ok()
        .map(|raw| parse_var(name, &raw))
        .transpose()
}

fn parse_var<T: FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{name}={raw}")))
}

impl AppConfig {
    /// Build configuration from environment variables, reading a `.env`
    /// file first when one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| default_database_url());
        let slug_config_path = env::var("SLUG_CONFIG")
            .map(PathBuf::from)
            .map_err(|_| ConfigError::Missing("SLUG_CONFIG"))?;

        let workspace_id = optional_var::<i64>("SLUG_WORKSPACE_ID")?.map(WorkspaceId);
        let populate_limit = optional_var::<usize>("SLUG_POPULATE_LIMIT")?;

        Ok(Self {
            database_url,
            slug_config_path,
            workspace_id,
            populate_limit,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn populate_limit(&self) -> Option<usize> {
        self.populate_limit
    }

    /// Reads the JSON slug configuration; `SLUG_WORKSPACE_ID` wins over the
    /// workspace stored in the file.
    pub fn slug_configuration(&self) -> Result<SlugConfiguration, ConfigError> {
        let raw = fs::read_to_string(&self.slug_config_path).map_err(|err| {
            ConfigError::Invalid(format!("{}: {err}", self.slug_config_path.display()))
        })?;
        let config =
            SlugConfiguration::from_json(&raw).map_err(|err| ConfigError::Invalid(err.to_string()))?;

        Ok(match self.workspace_id {
            Some(workspace_id) => config.with_workspace(workspace_id),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_variables_are_validated() {
        assert_eq!(parse_var::<usize>("SLUG_POPULATE_LIMIT", " 25 ").unwrap(), 25);
        assert_eq!(parse_var::<i64>("SLUG_WORKSPACE_ID", "3").unwrap(), 3);

        let err = parse_var::<usize>("SLUG_POPULATE_LIMIT", "lots").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg == "SLUG_POPULATE_LIMIT=lots"));
        assert!(parse_var::<usize>("SLUG_POPULATE_LIMIT", "-1").is_err());
        assert!(parse_var::<i64>("SLUG_WORKSPACE_ID", "live").is_err());
    }
}
