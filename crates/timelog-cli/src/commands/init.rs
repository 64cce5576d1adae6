use timelog_core::{user_message, LocalZone, SqliteStore, TimezoneMode};

use crate::app::{resolve_config_path, AppContext};
use crate::cli::{DisplayArg, InitArgs};
use crate::commands::report;
use crate::config::{default_db_path, write_config, TimelogConfig};
use crate::errors::CliError;

pub fn handle_init(ctx: &AppContext<'_>, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}\nPass --force to overwrite it.",
            config_path.display()
        ))
        .into());
    }

    let timezone = args
        .timezone
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());
    let zone = LocalZone::from_name(timezone)
        .map_err(|err| CliError::invalid_input(user_message(&err)))?;

    let display = match args.display {
        Some(DisplayArg::Utc) => TimezoneMode::Utc,
        Some(DisplayArg::Local) | None => TimezoneMode::Local,
    };

    let db_path = match ctx.cli().db.clone() {
        Some(path) => path,
        None => default_db_path()?,
    };

    let config = TimelogConfig::new(db_path.clone(), timezone.map(str::to_string), display);
    write_config(&config_path, &config)?;
    SqliteStore::open(&db_path)
        .map_err(|e| anyhow::anyhow!("Failed to create database {}: {}", db_path.display(), e))?;

    let ui = ctx.ui_context(false, None);
    let config_display = config_path.display().to_string();
    let db_display = db_path.display().to_string();
    let zone_display = zone.to_string();
    let display_mode = display.to_string();
    report(
        ctx,
        &ui,
        "Timelog initialized",
        &[
            ("Config", config_display.as_str()),
            ("Database", db_display.as_str()),
            ("Timezone", zone_display.as_str()),
            ("Display", display_mode.as_str()),
        ],
    );
    Ok(())
}
