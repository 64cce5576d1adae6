use timelog_core::{Intent, TemplateId, UiPort};

use crate::app::AppContext;
use crate::commands::{ensure_saved, report};
use crate::constants::TEMPLATE_ID_HINT;
use crate::ui::render::badge;
use crate::ui::{Badge, Listing, TerminalUi};

pub fn handle_add(ctx: &AppContext<'_>, name: &str) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;
    let mut ui = ctx.terminal_ui();

    session.dispatch(Intent::AddTemplate(name.to_string()), &mut ui);
    ui.check(TEMPLATE_ID_HINT)?;
    ensure_saved(ctx, ui.ctx(), &session)?;

    if let Some(template) = session.templates().list().last() {
        if ctx.quiet() {
            println!("{}", template.id);
        } else {
            report(
                ctx,
                ui.ctx(),
                "Template added",
                &[("ID", template.id.as_str()), ("Name", template.name.as_str())],
            );
        }
    }
    Ok(())
}

pub fn handle_list(ctx: &AppContext<'_>, json: bool) -> anyhow::Result<()> {
    let session = ctx.open_session()?;
    let mut ui = TerminalUi::new(ctx.ui_context(json, None)).with_listing(Listing::Templates);
    ui.render(&session.view());
    Ok(())
}

pub fn handle_delete(ctx: &AppContext<'_>, id: &str) -> anyhow::Result<()> {
    let mut session = ctx.open_session()?;
    let mut ui = ctx.terminal_ui();
    let id = TemplateId::new(id);

    let existed = session.templates().get(&id).is_some();

    session.dispatch(Intent::DeleteTemplate(id.clone()), &mut ui);
    ui.check(TEMPLATE_ID_HINT)?;
    ensure_saved(ctx, ui.ctx(), &session)?;

    if existed {
        report(ctx, ui.ctx(), "Template deleted", &[("ID", id.as_str())]);
    } else if !ctx.quiet() {
        let message = format!("No template with ID {}; nothing deleted", id);
        println!("{}", badge(ui.ctx(), Badge::Info, &message));
    }
    Ok(())
}
