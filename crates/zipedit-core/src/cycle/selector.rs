//! Member selection.

use std::io::BufRead;
use std::io::Write;

use super::SharedTerminal;

/// Keyword that ends the session at the selection prompt.
pub const QUIT_KEYWORD: &str = "q";

/// What the user chose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Edit this member.
    Member(String),
    /// End the session.
    Quit,
}

/// Chooses the member to edit next.
pub trait MemberSelector {
    /// Picks one of `members` or quits.
    ///
    /// Invalid input must be handled inside the selector; only I/O failures
    /// are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the user's input cannot be read.
    fn select(&mut self, members: &[String]) -> std::io::Result<Selection>;
}

/// Numbered text prompt.
///
/// Lists members with 1-based indices and reads a number or `q`.
/// Anything else reprompts. End of input quits.
#[derive(Debug)]
pub struct PromptSelector<R, W> {
    terminal: SharedTerminal<R, W>,
}

impl<R: BufRead, W: Write> PromptSelector<R, W> {
    /// Creates a selector reading from `terminal`.
    pub const fn new(terminal: SharedTerminal<R, W>) -> Self {
        Self { terminal }
    }
}

impl<R: BufRead, W: Write> MemberSelector for PromptSelector<R, W> {
    fn select(&mut self, members: &[String]) -> std::io::Result<Selection> {
        let mut terminal = self.terminal.borrow_mut();
        let (input, output) = terminal.split();

        writeln!(output, "\nArchived members:")?;
        for (i, name) in members.iter().enumerate() {
            writeln!(output, "{}. {name}", i + 1)?;
        }

        let mut line = Vec::new();
        loop {
            write!(
                output,
                "Enter the number of the member to edit (or '{QUIT_KEYWORD}' to quit): "
            )?;
            output.flush()?;

            line.clear();
            if input.read_until(b'\n', &mut line)? == 0 {
                writeln!(output)?;
                return Ok(Selection::Quit);
            }

            // undecodable bytes become U+FFFD and fail to parse like any other garbage
            let text = String::from_utf8_lossy(&line);
            match parse_choice(text.trim(), members.len()) {
                Choice::Quit => return Ok(Selection::Quit),
                Choice::Index(i) => return Ok(Selection::Member(members[i].clone())),
                Choice::OutOfRange => writeln!(
                    output,
                    "Invalid selection. Please enter a number between 1 and {}.",
                    members.len()
                )?,
                Choice::NotANumber => writeln!(output, "Invalid input. Please enter a number.")?,
            }
        }
    }
}

enum Choice {
    Quit,
    Index(usize),
    OutOfRange,
    NotANumber,
}

fn parse_choice(input: &str, len: usize) -> Choice {
    if input.eq_ignore_ascii_case(QUIT_KEYWORD) {
        return Choice::Quit;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => Choice::Index(n - 1),
        Ok(_) => Choice::OutOfRange,
        // "-1" and "99999999999999999999" are numbers, just not usable ones
        Err(_) if input.parse::<i128>().is_ok() => Choice::OutOfRange,
        Err(_) => Choice::NotANumber,
    }
}
