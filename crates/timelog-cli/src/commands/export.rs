use timelog_core::Intent;

use crate::app::AppContext;
use crate::cli::ExportArgs;
use crate::commands::report;
use crate::constants::ENTRY_ID_HINT;
use crate::ui::ExportTarget;

pub fn handle_export(ctx: &AppContext<'_>, args: &ExportArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;
    let target = if args.stdout {
        ExportTarget::Stdout
    } else {
        match &args.output {
            Some(dir) => ExportTarget::Directory(dir.clone()),
            None => ExportTarget::Directory(std::env::current_dir()?),
        }
    };
    let mut ui = ctx.terminal_ui().with_export_target(target);

    session.dispatch(Intent::ExportRequested, &mut ui);
    ui.check(ENTRY_ID_HINT)?;

    if let Some(path) = ui.exported() {
        let file = path.display().to_string();
        let count = session.entries().len().to_string();
        report(
            ctx,
            ui.ctx(),
            "Entries exported",
            &[("File", file.as_str()), ("Entries", count.as_str())],
        );
    }
    Ok(())
}
