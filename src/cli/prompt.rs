//! Line-based prompts.
//!
//! All readers/writers are passed in so the menu and the sweep prompts can be
//! driven from tests with in-memory buffers.

use std::io::{BufRead, Write};

use crate::domain::SweepSettings;
use crate::error::AppError;

/// Print `message` (no newline) and read one line.
///
/// Returns `None` at end of input. The trailing newline is stripped; other
/// whitespace is preserved.
pub fn prompt_line<R, W>(input: &mut R, out: &mut W, message: &str) -> Result<Option<String>, AppError>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    write!(out, "{message}").map_err(|e| AppError::io("Failed to write prompt", e))?;
    out.flush().map_err(|e| AppError::io("Failed to write prompt", e))?;

    let mut line = String::new();
    let bytes = input
        .read_line(&mut line)
        .map_err(|e| AppError::io("Failed to read input", e))?;
    if bytes == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']);
    Ok(Some(trimmed.to_string()))
}

/// Prompt for an integer. Non-integer input or end of input is an error.
pub fn prompt_integer<R, W>(input: &mut R, out: &mut W, message: &str) -> Result<i64, AppError>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    let Some(line) = prompt_line(input, out, message)? else {
        return Err(AppError::input("No input received."));
    };
    let text = line.trim();
    text.parse::<i64>()
        .map_err(|e| AppError::input(format!("Invalid integer '{text}': {e}")))
}

/// Ask for the sweep bounds and apply the clamping rules.
pub fn prompt_sweep_settings<R, W>(input: &mut R, out: &mut W) -> Result<SweepSettings, AppError>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    let min_trials = prompt_integer(input, out, "Define mimimum number of trials: ")?;
    let max_trials = prompt_integer(input, out, "Define maximum number of trials: ")?;
    let runs = prompt_integer(input, out, "Define how many simulations to run: ")?;

    let settings = SweepSettings::clamped(min_trials, max_trials, runs);
    if (settings.min_trials as i64, settings.max_trials as i64, settings.runs as i64)
        != (min_trials, max_trials, runs)
    {
        log::info!(
            "sweep inputs clamped: ({min_trials}, {max_trials}, {runs}) -> ({}, {}, {})",
            settings.min_trials,
            settings.max_trials,
            settings.runs
        );
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_and_clamps_sweep_settings() {
        let mut input = Cursor::new("0\n1\n5\n");
        let mut out = Vec::new();
        let s = prompt_sweep_settings(&mut input, &mut out).unwrap();
        assert_eq!(s, SweepSettings { min_trials: 2, max_trials: 22, runs: 20 });

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Define mimimum number of trials: "));
        assert!(printed.contains("Define how many simulations to run: "));
    }

    #[test]
    fn max_below_min_gets_min_plus_twenty() {
        let mut input = Cursor::new("5\n1\n30\n");
        let s = prompt_sweep_settings(&mut input, &mut Vec::new()).unwrap();
        assert_eq!(s, SweepSettings { min_trials: 5, max_trials: 25, runs: 30 });
    }

    #[test]
    fn non_integer_input_is_fatal() {
        let mut input = Cursor::new("ten\n");
        let err = prompt_sweep_settings(&mut input, &mut Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("ten"));
    }

    #[test]
    fn eof_is_an_error_for_integers() {
        let mut input = Cursor::new("3\n");
        assert!(prompt_sweep_settings(&mut input, &mut Vec::new()).is_err());
    }

    #[test]
    fn prompt_line_strips_newline_only() {
        let mut input = Cursor::new(" 2 \r\n");
        let line = prompt_line(&mut input, &mut Vec::new(), "> ").unwrap();
        assert_eq!(line.as_deref(), Some(" 2 "));
        assert_eq!(prompt_line(&mut input, &mut Vec::new(), "> ").unwrap(), None);
    }
}
