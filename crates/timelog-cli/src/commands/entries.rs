use timelog_core::{
    EntryId, FormField, FormInput, Intent, SessionController, TemplateId, TimezoneMode,
};

use crate::app::AppContext;
use crate::cli::{AddArgs, EditArgs, ListArgs, QuickArgs};
use crate::commands::{ensure_saved, prompt_text, report};
use crate::constants::{ENTRY_ID_HINT, TEMPLATE_ID_HINT};
use crate::errors::CliError;
use crate::ui::render::{badge, hint};
use crate::ui::{Badge, Listing, TerminalUi};

pub fn handle_add(ctx: &AppContext<'_>, args: &AddArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;
    let mut ui = ctx.terminal_ui();

    let description = match &args.template {
        Some(id) => {
            session.dispatch(Intent::UseTemplate(TemplateId::new(id.as_str())), &mut ui);
            ui.check(TEMPLATE_ID_HINT)?;
            ui.field(FormField::Description).unwrap_or_default().to_string()
        }
        None => args.description.clone().unwrap_or_default(),
    };
    let timestamp = args
        .at
        .clone()
        .unwrap_or_else(|| session.default_timestamp_input());

    session.dispatch(
        Intent::Submit(FormInput::new(&timestamp, &description, args.notes.as_deref())),
        &mut ui,
    );
    ui.check(ENTRY_ID_HINT)?;
    ensure_saved(ctx, ui.ctx(), &session)?;

    print_entry_receipt(ctx, &ui, &session, "Entry added");
    Ok(())
}

pub fn handle_quick(ctx: &AppContext<'_>, args: &QuickArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;
    let mut ui = ctx.terminal_ui();
    let interactive = ui.ctx().interactive && !args.no_input;

    let intent = match &args.at {
        Some(timestamp) => Intent::QuickCapture(timestamp.clone()),
        None => Intent::CaptureNow,
    };
    session.dispatch(intent, &mut ui);
    ui.check(ENTRY_ID_HINT)?;
    ensure_saved(ctx, ui.ctx(), &session)?;

    session.tick(&mut ui);
    let form = ui
        .take_form()
        .ok_or_else(|| anyhow::anyhow!("Captured entry could not be opened for editing"))?;

    if !interactive {
        session.dispatch(Intent::Cancel, &mut ui);
        print_entry_receipt(ctx, &ui, &session, "Quick entry captured");
        if !ctx.quiet() {
            let next = format!("Run `timelog edit {}` to describe it.", form.entry_id);
            println!("{}", hint(ui.ctx(), &next));
        }
        return Ok(());
    }

    let description = prompt_text("Description", &form.description)?;
    let notes = prompt_text("Notes", &form.notes)?;
    session.dispatch(
        Intent::Submit(FormInput::new(&form.timestamp, &description, Some(notes.as_str()))),
        &mut ui,
    );
    if let Err(err) = ui.check(ENTRY_ID_HINT) {
        session.dispatch(Intent::Cancel, &mut ui);
        eprintln!(
            "{}",
            hint(
                ui.ctx(),
                &format!("The entry was kept; run `timelog edit {}` to finish it.", form.entry_id)
            )
        );
        return Err(err.into());
    }
    ensure_saved(ctx, ui.ctx(), &session)?;

    print_entry_receipt(ctx, &ui, &session, "Entry added");
    Ok(())
}

pub fn handle_edit(ctx: &AppContext<'_>, args: &EditArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;
    let mut ui = ctx.terminal_ui();
    let interactive = ui.ctx().interactive && !args.no_input;

    session.dispatch(Intent::Edit(EntryId::new(args.id.as_str())), &mut ui);
    ui.check(ENTRY_ID_HINT)?;
    let form = ui
        .take_form()
        .ok_or_else(|| anyhow::anyhow!("Entry {} could not be opened for editing", args.id))?;

    let timestamp = field_value(&args.at, "Date/time", &form.timestamp, interactive)?;
    let description = field_value(&args.description, "Description", &form.description, interactive)?;
    let notes = field_value(&args.notes, "Notes", &form.notes, interactive)?;

    session.dispatch(
        Intent::Submit(FormInput::new(&timestamp, &description, Some(notes.as_str()))),
        &mut ui,
    );
    ui.check(ENTRY_ID_HINT)?;
    ensure_saved(ctx, ui.ctx(), &session)?;

    let id = EntryId::new(args.id.as_str());
    if let Some(entry) = session.entries().get(&id) {
        let time = session.display_timestamp(entry);
        report(
            ctx,
            ui.ctx(),
            "Entry updated",
            &[
                ("ID", entry.id.as_str()),
                ("Time", time.as_str()),
                ("Description", entry.description.as_str()),
            ],
        );
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext<'_>, id: &str) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;
    let mut ui = ctx.terminal_ui();
    let id = EntryId::new(id);
    let existed = session.entries().contains(&id);

    session.dispatch(Intent::Delete(id.clone()), &mut ui);
    ui.check(ENTRY_ID_HINT)?;
    ensure_saved(ctx, ui.ctx(), &session)?;

    if existed {
        report(ctx, ui.ctx(), "Entry deleted", &[("ID", id.as_str())]);
    } else if !ctx.quiet() {
        let message = format!("No entry with ID {}; nothing deleted", id);
        println!("{}", badge(ui.ctx(), Badge::Info, &message));
    }
    Ok(())
}

pub fn handle_clear(ctx: &AppContext<'_>, force: bool) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;
    let mut ui = ctx.terminal_ui().with_assume_yes(force);
    let count = session.entries().len();

    session.dispatch(Intent::ClearAll, &mut ui);
    ui.check(ENTRY_ID_HINT)?;

    if ui.confirmed() != Some(true) {
        if !ui.ctx().interactive {
            return Err(CliError::invalid_input(
                "Refusing to clear entries without confirmation\nPass --force to clear them.",
            )
            .into());
        }
        if !ctx.quiet() {
            println!("{}", badge(ui.ctx(), Badge::Info, "Cancelled"));
        }
        return Ok(());
    }
    ensure_saved(ctx, ui.ctx(), &session)?;

    let removed = count.to_string();
    report(ctx, ui.ctx(), "Entries cleared", &[("Removed", removed.as_str())]);
    Ok(())
}

pub fn handle_list(ctx: &AppContext<'_>, args: &ListArgs) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;
    let mode = if args.utc {
        TimezoneMode::Utc
    } else if args.local {
        TimezoneMode::Local
    } else {
        session.mode()
    };
    let mut ui = TerminalUi::new(ctx.ui_context(args.json, args.format))
        .with_listing(Listing::Entries { limit: args.limit });

    session.dispatch(Intent::ChangeTimezone(mode), &mut ui);
    ui.check(ENTRY_ID_HINT)?;
    Ok(())
}

/// Value of an edit field: the flag when given, a prompt when interactive,
/// otherwise the current value.
fn field_value(
    flag: &Option<String>,
    label: &str,
    current: &str,
    interactive: bool,
) -> anyhow::Result<String> {
    match flag {
        Some(value) => Ok(value.clone()),
        None if interactive => prompt_text(label, current),
        None => Ok(current.to_string()),
    }
}

/// Receipt for the newest entry, which is where new entries are inserted.
fn print_entry_receipt(
    ctx: &AppContext<'_>,
    ui: &TerminalUi,
    session: &SessionController,
    title: &str,
) {
    let Some(entry) = session.entries().list().first() else {
        return;
    };
    if ctx.quiet() {
        println!("{}", entry.id);
        return;
    }
    let time = session.display_timestamp(entry);
    report(
        ctx,
        ui.ctx(),
        title,
        &[
            ("ID", entry.id.as_str()),
            ("Time", time.as_str()),
            ("Description", entry.description.as_str()),
        ],
    );
}
