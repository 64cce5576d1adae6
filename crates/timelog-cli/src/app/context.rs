//! Application context for the Timelog CLI.
//!
//! Bundles the parsed arguments with a lazily-loaded config and knows how
//! to open a session against the configured database.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;
use tracing::debug;

use timelog_core::{
    user_message, LocalZone, PersistenceGateway, SessionController, SqliteStore, SystemClock,
};

use crate::cli::{Cli, FormatArg};
use crate::config::TimelogConfig;
use crate::errors::CliError;
use crate::ui::{TerminalUi, UiContext};

use super::resolver::{load_config, resolve_db_path};

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<TimelogConfig>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the configuration, loading it on first use.
    pub fn config(&self) -> anyhow::Result<&TimelogConfig> {
        self.config.get_or_try_init(load_config)
    }

    pub fn db_path(&self) -> anyhow::Result<PathBuf> {
        resolve_db_path(self.cli, self.config()?)
    }

    /// Zone used for local display and for reading timestamp input.
    pub fn zone(&self) -> anyhow::Result<LocalZone> {
        let name = self.config()?.ui.timezone.as_deref();
        LocalZone::from_name(name)
            .map_err(|err| CliError::invalid_input(format!("Config: {}", user_message(&err))).into())
    }

    /// Open the database and load a session from it.
    pub fn open_session(&self) -> anyhow::Result<SessionController> {
        let config = self.config()?;
        let path = self.db_path()?;
        let store = SqliteStore::open(&path)
            .map_err(|e| anyhow::anyhow!("Failed to open database {}: {}", path.display(), e))?
            .with_quota(config.storage.quota_bytes);
        debug!(path = %path.display(), "Opened timelog database");

        let session = SessionController::load(
            PersistenceGateway::from_store(store),
            self.zone()?,
            Box::new(SystemClock),
        )
        .with_mode(config.ui.display);
        Ok(session)
    }

    pub fn ui_context(&self, json: bool, format: Option<FormatArg>) -> UiContext {
        UiContext::from_env(json, format)
    }

    /// Terminal UI with default output settings.
    pub fn terminal_ui(&self) -> TerminalUi {
        TerminalUi::new(self.ui_context(false, None))
    }
}
