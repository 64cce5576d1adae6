pub mod entries;
pub mod export;
pub mod init;
pub mod misc;
pub mod templates;

use dialoguer::Input;

use timelog_core::SessionController;

use crate::app::AppContext;
use crate::errors::CliError;
use crate::ui::render::{receipt, warning};
use crate::ui::UiContext;

/// Print an action receipt unless `--quiet` is set.
pub(crate) fn report(ctx: &AppContext<'_>, ui: &UiContext, title: &str, items: &[(&str, &str)]) {
    if !ctx.quiet() {
        println!("{}", receipt(ui, title, items));
    }
}

/// Fail the command when the last write did not reach the database.
pub(crate) fn ensure_saved(
    ctx: &AppContext<'_>,
    ui: &UiContext,
    session: &SessionController,
) -> anyhow::Result<()> {
    if session.is_persisted() {
        return Ok(());
    }
    let path = ctx.db_path()?;
    eprintln!(
        "{}",
        warning(ui, "Changes were applied but could not be saved.")
    );
    Err(CliError::Failed(format!("Failed to save changes to {}", path.display())).into())
}

pub(crate) fn prompt_text(label: &str, initial: &str) -> anyhow::Result<String> {
    let value = Input::<String>::new()
        .with_prompt(label)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}
