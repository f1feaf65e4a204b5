//! Clap command tree for the `staybook` binary.

use clap::{value_parser, Arg, ArgAction, Command};

/// Builds the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("staybook")
        .about("Booking availability checks for a small rental property")
        .version(staybook_core::core_version())
        .subcommand_required(true)
        .arg(
            Arg::new("db")
                .long("db")
                .env("STAYBOOK_DB")
                .default_value("staybook.sqlite3")
                .help("Booking store path")
                .global(true),
        )
        .arg(
            Arg::new("log-dir")
                .long("log-dir")
                .env("STAYBOOK_LOG_DIR")
                .help("Absolute directory for rolling logs (logging is off when unset)")
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .env("STAYBOOK_LOG_LEVEL")
                .help("trace|debug|info|warn|error (default depends on build mode)")
                .global(true),
        )
        .arg(
            Arg::new("suggestion-nights")
                .long("suggestion-nights")
                .value_parser(value_parser!(u32))
                .help("Length of suggested replacement stays (default: 3)")
                .global(true),
        )
        .arg(
            Arg::new("match-request-length")
                .long("match-request-length")
                .action(ArgAction::SetTrue)
                .conflicts_with("suggestion-nights")
                .help("Suggest stays as long as the requested one")
                .global(true),
        )
        .arg(
            Arg::new("horizon-days")
                .long("horizon-days")
                .value_parser(value_parser!(u32))
                .help("Candidate start days scanned for a suggestion (default: 30)")
                .global(true),
        )
        .subcommand(with_stay_args(
            Command::new("availability").about("Check whether a unit is free for a stay"),
        ))
        .subcommand(with_stay_args(
            Command::new("book").about("Block dates for a unit"),
        ))
        .subcommand(Command::new("bookings").about("List every stored booking"))
        .subcommand(
            Command::new("cancel")
                .about("Delete one booking by id")
                .arg(Arg::new("id").required(true).help("Booking id (UUID)")),
        )
        .subcommand(Command::new("seed").about("Insert sample bookings into an empty store"))
}

fn with_stay_args(command: Command) -> Command {
    command
        .arg(Arg::new("unit").long("unit").required(true).help("Unit key"))
        .arg(
            Arg::new("check-in")
                .long("check-in")
                .required(true)
                .help("Check-in date, YYYY-MM-DD"),
        )
        .arg(
            Arg::new("check-out")
                .long("check-out")
                .required(true)
                .help("Check-out date, YYYY-MM-DD (exclusive)"),
        )
}
