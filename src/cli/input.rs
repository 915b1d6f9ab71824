//! Interactive input collection
//!
//! Every prompt re-asks until the answer parses, so callers only ever see
//! well-formed values. The prompter is generic over its reader and writer
//! so whole conversations can be scripted in tests.

use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};

use chrono::NaiveDate;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

use crate::app::RoomType;
use crate::constants::display;
use crate::errors::{AppError, Result};

/// Parse a `dd/mm/yyyy` date
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), display::DATE_FORMAT).ok()
}

/// Reads answers from `R` and writes prompts to `W`
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
    clear_screen: bool,
}

impl Prompter<StdinLock<'static>, Stdout> {
    /// Prompter on the process terminal, clearing screens only on a real tty
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout(), atty::is(atty::Stream::Stdout))
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter over arbitrary streams
    pub fn new(reader: R, writer: W, clear_screen: bool) -> Self {
        Self {
            reader,
            writer,
            clear_screen,
        }
    }

    /// Output stream
    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Write text followed by a newline
    pub fn say(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.writer, "{}", text.as_ref())?;
        Ok(())
    }

    /// Clear the terminal when attached to one
    pub fn clear(&mut self) -> Result<()> {
        if self.clear_screen {
            execute!(self.writer, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    /// Show `message` and read one trimmed line
    ///
    /// Fails once input is exhausted so loops cannot spin forever.
    pub fn line(&mut self, message: &str) -> Result<String> {
        write!(self.writer, "{}", message)?;
        self.writer.flush()?;

        let mut input = String::new();
        let read = self.reader.read_line(&mut input)?;
        if read == 0 {
            return Err(AppError::generic("Input closed"));
        }
        Ok(input.trim().to_string())
    }

    /// Wait for ENTER
    pub fn pause(&mut self) -> Result<()> {
        self.line("\nPress ENTER to continue...")?;
        Ok(())
    }

    /// Integer within optional bounds
    pub fn integer(&mut self, message: &str, min: Option<i64>, max: Option<i64>) -> Result<i64> {
        loop {
            let answer = self.line(message)?;
            let Ok(value) = answer.parse::<i64>() else {
                self.say("❌ Please enter a whole number.")?;
                continue;
            };

            if let Some(min) = min.filter(|min| value < *min) {
                self.say(format!("❌ The value must be at least {}.", min))?;
                continue;
            }
            if let Some(max) = max.filter(|max| value > *max) {
                self.say(format!("❌ The value must be at most {}.", max))?;
                continue;
            }
            return Ok(value);
        }
    }

    /// Non-empty text
    pub fn non_empty(&mut self, message: &str, error: &str) -> Result<String> {
        loop {
            let answer = self.line(message)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.say(error)?;
        }
    }

    /// Date in `dd/mm/yyyy`
    pub fn date(&mut self, message: &str) -> Result<NaiveDate> {
        loop {
            let answer = self.line(message)?;
            match parse_date(&answer) {
                Some(date) => return Ok(date),
                None => self.say(format!(
                    "❌ Please enter a valid date as {}.",
                    display::DATE_HINT
                ))?,
            }
        }
    }

    /// Check-in and check-out, re-asking both until the stay is at least one night
    pub fn stay(&mut self) -> Result<(NaiveDate, NaiveDate)> {
        loop {
            let check_in = self.date(&format!("Check-in date ({}): ", display::DATE_HINT))?;
            let check_out = self.date(&format!("Check-out date ({}): ", display::DATE_HINT))?;
            if check_out > check_in {
                return Ok((check_in, check_out));
            }
            self.say("❌ The check-out date must be after the check-in date.")?;
        }
    }

    /// One of the known room types
    pub fn room_type(&mut self) -> Result<RoomType> {
        self.say(format!("\nRoom types: {}", RoomType::names()))?;
        loop {
            let answer = self.line("Room type: ")?;
            match answer.parse::<RoomType>() {
                Ok(room_type) => return Ok(room_type),
                Err(_) => self.say(format!(
                    "❌ Please enter a valid room type: {}",
                    RoomType::names()
                ))?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false)
    }

    fn output(prompter: &mut Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.writer().clone()).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 05/01/2025 "),
            NaiveDate::from_ymd_opt(2025, 1, 5)
        );
        assert_eq!(parse_date("2025-01-05"), None);
        assert_eq!(parse_date("31/02/2025"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_integer_reprompts_until_in_range() {
        let mut prompter = prompter("abc\n0\n9\n4\n");

        let value = prompter.integer("Option: ", Some(1), Some(6)).unwrap();

        assert_eq!(value, 4);
        let shown = output(&mut prompter);
        assert!(shown.contains("whole number"));
        assert!(shown.contains("at least 1"));
        assert!(shown.contains("at most 6"));
    }

    #[test]
    fn test_stay_reprompts_on_bad_dates_and_order() {
        let mut prompter = prompter("1/13/2025\n05/01/2025\n05/01/2025\n05/01/2025\n08/01/2025\n");

        let (check_in, check_out) = prompter.stay().unwrap();

        assert_eq!(check_in, NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
        assert_eq!(check_out, NaiveDate::from_ymd_opt(2025, 1, 8).unwrap());
        assert!(output(&mut prompter).contains("must be after"));
    }

    #[test]
    fn test_room_type_is_case_insensitive() {
        let mut prompter = prompter("suite\n  PREMIUM \n");
        assert_eq!(prompter.room_type().unwrap(), RoomType::Premium);
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let mut empty = prompter("");
        assert!(empty.line("Name: ").is_err());

        let mut garbage = prompter("x\n");
        assert!(garbage.integer("Number: ", None, None).is_err());
    }
}
