//! `staybook` command-line boundary.
//!
//! # Responsibility
//! - Decode operator input and hand it to the core services.
//! - Print public response shapes as JSON on stdout.
//!
//! # Exit codes
//! - `0` success, `2` rejected input, `3` booking conflict, `1` anything else.

mod commands;

use anyhow::Context;
use clap::ArgMatches;
use log::info;
use serde_json::{json, Value};
use staybook_core::db::open_db;
use staybook_core::{
    default_log_level, init_logging, AvailabilityConfig, AvailabilityQuery, BookingRepository,
    BookingService, BookingServiceError, CreateBookingRequest, RequestContext,
    SqliteBookingRepository,
};
use std::process;
use uuid::Uuid;

use commands::build_cli;

const EXIT_FAILURE: i32 = 1;
const EXIT_INVALID_INPUT: i32 = 2;
const EXIT_CONFLICT: i32 = 3;

fn main() {
    let matches = build_cli().get_matches();
    match run(&matches) {
        Ok(()) => {}
        Err(err) => {
            let code = exit_code(&err);
            eprintln!("{}", json!({ "error": format!("{err:#}") }));
            if let Some(BookingServiceError::Conflict { conflicts, .. }) =
                err.downcast_ref::<BookingServiceError>()
            {
                if let Ok(text) = serde_json::to_string_pretty(&json!({ "conflicts": conflicts })) {
                    eprintln!("{text}");
                }
            }
            process::exit(code);
        }
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    if let Some(log_dir) = matches.get_one::<String>("log-dir") {
        init_logging(log_level(matches), log_dir).context("failed to initialize logging")?;
    }

    let db_path = matches
        .get_one::<String>("db")
        .context("missing --db value")?;
    let mut conn = open_db(db_path)
        .with_context(|| format!("failed to open booking store `{db_path}`"))?;
    let repo = SqliteBookingRepository::new(&mut conn);
    let mut service = BookingService::with_config(repo, availability_config(matches))
        .context("invalid availability configuration")?;

    let output = dispatch(&mut service, matches)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Runs the selected subcommand and returns its JSON response.
fn dispatch<R: BookingRepository>(
    service: &mut BookingService<R>,
    matches: &ArgMatches,
) -> anyhow::Result<Value> {
    let operator = RequestContext::admin("cli");

    let output = match matches.subcommand() {
        Some(("availability", sub)) => {
            let query = AvailabilityQuery::new(
                required(sub, "unit")?,
                required(sub, "check-in")?,
                required(sub, "check-out")?,
            );
            serde_json::to_value(service.check_availability(&query)?)?
        }
        Some(("book", sub)) => {
            let request = CreateBookingRequest::new(
                required(sub, "unit")?,
                required(sub, "check-in")?,
                required(sub, "check-out")?,
            );
            serde_json::to_value(service.create_booking(&operator, &request)?)?
        }
        Some(("bookings", _)) => serde_json::to_value(service.list_bookings(&operator)?)?,
        Some(("cancel", sub)) => {
            let id = required(sub, "id")?;
            let id = Uuid::parse_str(id.trim())
                .map_err(|_| InvalidArgument(format!("`{id}` is not a booking id")))?;
            service.delete_booking(&operator, id)?;
            json!({ "success": true })
        }
        Some(("seed", _)) => {
            let inserted = service.seed_sample_bookings(&operator)?;
            info!("event=cli_seed module=cli status=ok inserted={inserted}");
            json!({ "inserted": inserted })
        }
        _ => unreachable!("subcommand_required is set"),
    };
    Ok(output)
}

fn log_level(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or(default_log_level())
}

fn availability_config(matches: &ArgMatches) -> AvailabilityConfig {
    let mut config = AvailabilityConfig::default();
    if matches.get_flag("match-request-length") {
        config = config.matching_request_length();
    } else if let Some(nights) = matches.get_one::<u32>("suggestion-nights") {
        config = config.with_fixed_nights(*nights);
    }
    if let Some(days) = matches.get_one::<u32>("horizon-days") {
        config = config.with_search_horizon(*days);
    }
    config
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> anyhow::Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing --{name}"))
}

/// Operator input rejected by the CLI itself, before reaching the core.
#[derive(Debug)]
struct InvalidArgument(String);

impl std::fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvalidArgument {}

fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<InvalidArgument>().is_some() {
        return EXIT_INVALID_INPUT;
    }
    match err.downcast_ref::<BookingServiceError>() {
        Some(BookingServiceError::InvalidInput(_)) => EXIT_INVALID_INPUT,
        Some(BookingServiceError::Conflict { .. }) => EXIT_CONFLICT,
        _ => EXIT_FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::{availability_config, dispatch, exit_code, log_level, InvalidArgument};
    use crate::commands::build_cli;
    use staybook_core::db::open_db_in_memory;
    use staybook_core::{
        default_log_level, BookingService, BookingServiceError, InputError,
        SqliteBookingRepository, SuggestionLength,
    };

    #[test]
    fn config_flags_map_onto_availability_config() {
        let matches = build_cli()
            .try_get_matches_from([
                "staybook",
                "--suggestion-nights",
                "5",
                "--horizon-days",
                "60",
                "bookings",
            ])
            .unwrap();
        let config = availability_config(&matches);
        assert_eq!(config.suggestion_length, SuggestionLength::Fixed(5));
        assert_eq!(config.search_horizon_days, 60);
    }

    #[test]
    fn exit_codes_follow_error_kind() {
        let invalid = anyhow::Error::new(BookingServiceError::InvalidInput(
            InputError::InvalidRange,
        ));
        assert_eq!(exit_code(&invalid), 2);
        assert_eq!(
            exit_code(&anyhow::Error::new(InvalidArgument("bad id".into()))),
            2
        );
        assert_eq!(
            exit_code(&anyhow::Error::new(BookingServiceError::Forbidden)),
            1
        );
    }

    #[test]
    fn log_level_falls_back_to_build_default() {
        let matches = build_cli()
            .try_get_matches_from(["staybook", "--log-level", "warn", "bookings"])
            .unwrap();
        assert_eq!(log_level(&matches), "warn");

        let matches = build_cli()
            .try_get_matches_from(["staybook", "bookings"])
            .unwrap();
        if std::env::var_os("STAYBOOK_LOG_LEVEL").is_none() {
            assert_eq!(log_level(&matches), default_log_level());
        }
    }

    #[test]
    fn seed_then_cancel_round_trips_through_dispatch() {
        let mut conn = open_db_in_memory().unwrap();
        let mut service = BookingService::new(SqliteBookingRepository::new(&mut conn));

        let seed = build_cli()
            .try_get_matches_from(["staybook", "seed"])
            .unwrap();
        assert_eq!(dispatch(&mut service, &seed).unwrap()["inserted"], 4);

        let list = build_cli()
            .try_get_matches_from(["staybook", "bookings"])
            .unwrap();
        let bookings = dispatch(&mut service, &list).unwrap();
        let id = bookings[0]["id"].as_str().unwrap().to_string();

        let cancel = build_cli()
            .try_get_matches_from(["staybook", "cancel", id.as_str()])
            .unwrap();
        assert_eq!(dispatch(&mut service, &cancel).unwrap()["success"], true);

        let err = dispatch(&mut service, &cancel).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BookingServiceError>(),
            Some(BookingServiceError::NotFound(_))
        ));
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn malformed_cancel_id_is_invalid_input() {
        let mut conn = open_db_in_memory().unwrap();
        let mut service = BookingService::new(SqliteBookingRepository::new(&mut conn));
        let cancel = build_cli()
            .try_get_matches_from(["staybook", "cancel", "not-a-uuid"])
            .unwrap();

        let err = dispatch(&mut service, &cancel).unwrap_err();
        assert_eq!(exit_code(&err), 2);
    }
}
