//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - builds the session (grid, RNG, config)
//! - runs the menu or a single subcommand

use std::io::{self, IsTerminal, Write};

use clap::Parser;

use crate::cli::menu::{MenuChoice, run_menu};
use crate::cli::{Cli, Command, rewrite_args};
use crate::domain::SweepSettings;
use crate::error::AppError;

pub mod session;

pub use session::Session;

/// Entry point for the `mcfit` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is fine; options fall back to flags and defaults.
    let _ = dotenvy::dotenv();

    // `mcfit` alone should open the menu. Clap requires a subcommand name, so
    // argv is rewritten before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);
    setup_logging(cli.common.verbose);

    let config = cli.common.to_config(io::stdout().is_terminal());
    let mut session = Session::new(config)?;

    match cli.command {
        Command::Menu => handle_menu(&mut session),
        Command::Fit2d => session.fit_2d(&mut io::stdout()).map(|_| ()),
        Command::Fit3d => session.fit_3d(&mut io::stdout()).map(|_| ()),
        Command::Sweep(args) => {
            let settings = SweepSettings::clamped(args.min_trials, args.max_trials, args.runs);
            session.sweep(&settings, &mut io::stdout()).map(|_| ())
        }
    }
}

fn handle_menu(session: &mut Session) -> Result<(), AppError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    run_menu(&mut input, &mut out, |choice, input, out| match choice {
        MenuChoice::Fit2d => session.fit_2d(out).map(|_| ()),
        MenuChoice::Fit3d => session.fit_3d(out).map(|_| ()),
        MenuChoice::Sweep => session.run_sim(input, out).map(|_| ()),
        MenuChoice::Quit => Ok(()),
    })
}

/// Initialise `env_logger` on stderr.
///
/// `-v` flags set the base level; `MCFIT_LOG` (same syntax as `RUST_LOG`)
/// overrides it per module.
pub fn setup_logging(verbose: u8) {
    let mut builder = env_logger::Builder::new();
    builder.format(|buf, record| {
        let module = record
            .module_path()
            .and_then(|p| p.split("::").nth(1))
            .unwrap_or("mcfit");
        writeln!(buf, "{:5} [{}]: {}", record.level(), module, record.args())
    });
    builder.filter_level(log_filter_from_level(verbose));
    builder.parse_env(env_logger::Env::new().filter("MCFIT_LOG"));
    // A second init (e.g. from tests) keeps the first logger.
    let _ = builder.try_init();
}

/// Converts a `-v` count to a log filter.
pub fn log_filter_from_level(level: u8) -> log::LevelFilter {
    match level {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PlotMode, RunConfig};
    use crate::report::NOTE_3D;
    use std::io::Cursor;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(log_filter_from_level(0), log::LevelFilter::Warn);
        assert_eq!(log_filter_from_level(1), log::LevelFilter::Info);
        assert_eq!(log_filter_from_level(2), log::LevelFilter::Debug);
        assert_eq!(log_filter_from_level(9), log::LevelFilter::Trace);
    }

    #[test]
    fn full_menu_flow_in_ascii_mode() {
        let config = RunConfig {
            grid_len: 100,
            seed: Some(11),
            plot: PlotMode::Ascii { width: 30, height: 8 },
            ..RunConfig::default()
        };
        let mut session = Session::new(config).unwrap();
        let mut input = Cursor::new("1\n2\nfoo\n3\n5\n1\n3\nq\n");
        let mut out = Vec::new();

        let mut fits = 0;
        let mut sweeps = Vec::new();
        run_menu(&mut input, &mut out, |choice, input, out| match choice {
            MenuChoice::Fit2d => session.fit_2d(out).map(|_| fits += 1),
            MenuChoice::Fit3d => session.fit_3d(out).map(|_| fits += 1),
            MenuChoice::Sweep => session.run_sim(input, out).map(|p| sweeps.push(p)),
            MenuChoice::Quit => Ok(()),
        })
        .unwrap();

        assert_eq!(fits, 2);
        assert_eq!(sweeps.len(), 1);
        // max=1 < min=5 -> 25; runs=3 -> 20.
        let trials: Vec<usize> = sweeps[0].iter().map(|p| p.trials).collect();
        assert_eq!(trials.len(), 20);
        assert_eq!((trials[0], trials[19]), (5, 25));

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Please choose a valid option").count(), 1);
        assert_eq!(text.matches(NOTE_3D).count(), 1);
    }
}
