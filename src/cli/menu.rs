//! Interactive main menu.
//!
//! The loop is: print the banner, read a selection, dispatch it, repeat.
//! Dispatch is a single `match`, so the "valid option" hint is printed only
//! for input that matches nothing. `q`/`quit`/`exit`/`4` or end of input leave
//! the loop.

use std::io::{BufRead, Write};

use crate::error::AppError;
use crate::report::{INVALID_OPTION, MENU_BANNER};

use super::prompt::prompt_line;

/// A recognized menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Fit2d,
    Fit3d,
    Sweep,
    Quit,
}

impl MenuChoice {
    /// Parse one line of menu input (surrounding whitespace ignored).
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Fit2d),
            "2" => Some(Self::Fit3d),
            "3" => Some(Self::Sweep),
            "4" => Some(Self::Quit),
            s if ["q", "quit", "exit"].iter().any(|q| s.eq_ignore_ascii_case(q)) => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Run the menu until the user quits or input ends.
///
/// `dispatch` runs one action; it gets the same reader and writer so actions
/// can prompt for more input. An error from `dispatch` ends the loop and is
/// returned.
pub fn run_menu<R, W, F>(input: &mut R, out: &mut W, mut dispatch: F) -> Result<(), AppError>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
    F: FnMut(MenuChoice, &mut R, &mut W) -> Result<(), AppError>,
{
    loop {
        writeln!(out).map_err(|e| AppError::io("Failed to write menu", e))?;
        write!(out, "{MENU_BANNER}").map_err(|e| AppError::io("Failed to write menu", e))?;

        let Some(selection) = prompt_line(input, out, "Make Selection: ")? else {
            log::debug!("menu: end of input");
            writeln!(out).map_err(|e| AppError::io("Failed to write menu", e))?;
            return Ok(());
        };

        match MenuChoice::parse(&selection) {
            Some(MenuChoice::Quit) => {
                log::debug!("menu: quit");
                return Ok(());
            }
            Some(choice) => {
                log::debug!("menu: dispatch {choice:?}");
                dispatch(choice, input, out)?;
            }
            None => {
                writeln!(out, "{INVALID_OPTION}").map_err(|e| AppError::io("Failed to write menu", e))?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_documented_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Fit2d));
        assert_eq!(MenuChoice::parse(" 2\t"), Some(MenuChoice::Fit3d));
        assert_eq!(MenuChoice::parse("3"), Some(MenuChoice::Sweep));
        assert_eq!(MenuChoice::parse("Q"), Some(MenuChoice::Quit));
        assert_eq!(MenuChoice::parse("exit"), Some(MenuChoice::Quit));
        assert_eq!(MenuChoice::parse("4"), Some(MenuChoice::Quit));
        assert_eq!(MenuChoice::parse("12"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn dispatches_in_order_and_quits() {
        let mut input = Cursor::new("1\n2\n3\nq\n1\n");
        let mut out = Vec::new();
        let mut seen = Vec::new();
        run_menu(&mut input, &mut out, |c, _, _| {
            seen.push(c);
            Ok(())
        })
        .unwrap();

        assert_eq!(seen, vec![MenuChoice::Fit2d, MenuChoice::Fit3d, MenuChoice::Sweep]);
        let printed = String::from_utf8(out).unwrap();
        assert!(!printed.contains(INVALID_OPTION));
        assert_eq!(printed.matches("### Main Menu ###").count(), 4);
    }

    #[test]
    fn invalid_input_prints_hint_once_and_reprompts() {
        let mut input = Cursor::new("7\n");
        let mut out = Vec::new();
        run_menu(&mut input, &mut out, |_, _, _| Ok(())).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.matches(INVALID_OPTION).count(), 1);
        // Re-prompted once more before EOF.
        assert_eq!(printed.matches("Make Selection: ").count(), 2);
    }

    #[test]
    fn dispatch_can_read_follow_up_input() {
        let mut input = Cursor::new("3\n42\nq\n");
        let mut out = Vec::new();
        let mut got = None;
        run_menu(&mut input, &mut out, |_, r, w| {
            got = crate::cli::prompt::prompt_line(r, w, "n: ")?;
            Ok(())
        })
        .unwrap();
        assert_eq!(got.as_deref(), Some("42"));
    }

    #[test]
    fn dispatch_error_ends_loop() {
        let mut input = Cursor::new("1\n1\n");
        let mut calls = 0;
        let err = run_menu(&mut input, &mut Vec::new(), |_, _, _| {
            calls += 1;
            Err(AppError::fit("no convergence"))
        })
        .unwrap_err();
        assert_eq!(calls, 1);
        assert_eq!(err.exit_code(), 3);
    }
}
