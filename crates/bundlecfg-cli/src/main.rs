//! bundlecfg - typed build configuration for a JavaScript bundler.
//!
//! Parses arguments, initializes logging and colors, and dispatches commands.

use bundlecfg_cli::{cli, commands, error, logger, ui};
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);
    ui::set_quiet(args.quiet);

    let result = match args.command {
        cli::Command::Show(show_args) => commands::show_execute(show_args),
        cli::Command::Check(check_args) => commands::check_execute(check_args),
        cli::Command::Init(init_args) => commands::init_execute(init_args),
        cli::Command::Schema => commands::schema_execute(),
        cli::Command::Rules(rules_args) => commands::rules_execute(rules_args),
    };

    // Convert CLI errors to miette diagnostics for error reporting
    result.map_err(error::cli_error_to_miette)
}
