//! Timelog CLI - log what you worked on, when you worked on it
//!
//! Terminal front end for `timelog-core`. Every command loads a session
//! from the configured SQLite file, dispatches one or two intents to it and
//! renders the outcome.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod logging;
mod ui;

use clap::Parser;

use crate::app::AppContext;
use crate::cli::{Cli, Commands, TemplateCommands};
use crate::errors::CliError;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(&cli) {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            cli_err.exit();
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(constants::exit_codes::GENERAL);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let ctx = AppContext::new(cli);

    match &cli.command {
        Commands::Init(args) => commands::init::handle_init(&ctx, args),
        Commands::Add(args) => commands::entries::handle_add(&ctx, args),
        Commands::Quick(args) => commands::entries::handle_quick(&ctx, args),
        Commands::Edit(args) => commands::entries::handle_edit(&ctx, args),
        Commands::Delete { id } => commands::entries::handle_delete(&ctx, id),
        Commands::Clear { force } => commands::entries::handle_clear(&ctx, *force),
        Commands::List(args) => commands::entries::handle_list(&ctx, args),
        Commands::Export(args) => commands::export::handle_export(&ctx, args),
        Commands::Template(sub) => match sub {
            TemplateCommands::Add { name } => commands::templates::handle_add(&ctx, name),
            TemplateCommands::List { json } => commands::templates::handle_list(&ctx, *json),
            TemplateCommands::Delete { id } => commands::templates::handle_delete(&ctx, id),
        },
        Commands::Completions { shell } => commands::misc::handle_completions(*shell),
    }
}
