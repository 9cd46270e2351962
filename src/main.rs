mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;

use cli::commands::events::EventsArgs;
use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    cli::context::init(args.verbose, args.quiet, args.config.clone());

    let result = match &args.command {
        Commands::Run {
            source,
            backup_root,
            output,
            format,
        } => cli::commands::run::execute(source, backup_root.as_deref(), output.as_deref(), *format),
        Commands::Backup {
            source,
            backup_root,
        } => cli::commands::backup::execute(source, backup_root.as_deref()),
        Commands::Report {
            file,
            output,
            format,
        } => cli::commands::report::execute(file, output.as_deref(), *format),
        Commands::Events {
            file,
            user,
            action,
            since,
            last,
            engineer,
            parameter_changes,
        } => cli::commands::events::execute(
            file,
            &EventsArgs {
                user: user.as_deref(),
                action: action.as_deref(),
                since: since.as_deref(),
                last: *last,
                engineer: *engineer,
                parameter_changes: *parameter_changes,
            },
        ),
        Commands::Init => cli::commands::init::execute(),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
