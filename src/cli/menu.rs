//! Interactive menu loop
//!
//! Each screen starts on a cleared terminal and ends by waiting for ENTER.
//! Refused operations are explained and the loop carries on; anything else
//! (closed input, broken terminal) ends the session.

use std::io::{BufRead, Write};

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::app::{BookingRequest, Ledger, ReservationId, ReservationStore};
use crate::cli::commands::{handle_cancel, handle_find, handle_list, handle_stats};
use crate::cli::display::Presenter;
use crate::cli::input::Prompter;
use crate::errors::Result;

/// Menu choices, numbered as shown on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    NewReservation,
    FindByGuest,
    ListAll,
    Cancel,
    Statistics,
    Exit,
}

impl MenuOption {
    fn from_number(number: i64) -> Option<Self> {
        match number {
            1 => Some(Self::NewReservation),
            2 => Some(Self::FindByGuest),
            3 => Some(Self::ListAll),
            4 => Some(Self::Cancel),
            5 => Some(Self::Statistics),
            6 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Keep going after refusals the user has already been told about
fn carry_on(result: Result<()>) -> Result<()> {
    match result {
        Err(e) if e.is_recoverable() => {
            debug!("Operation refused ({}): {}", e.category(), e);
            Ok(())
        }
        other => other,
    }
}

/// Run the menu until the user picks Exit
///
/// `clock` supplies the current moment for the cancellation rule.
pub async fn run_menu<S, R, W>(
    ledger: &mut Ledger<S>,
    presenter: &Presenter,
    prompter: &mut Prompter<R, W>,
    clock: impl Fn() -> NaiveDateTime,
) -> Result<()>
where
    S: ReservationStore,
    R: BufRead,
    W: Write,
{
    info!("Interactive menu started");

    loop {
        prompter.clear()?;
        prompter.say(presenter.banner())?;
        prompter.say(presenter.menu())?;

        let number = prompter.integer("Enter the option code: ", Some(1), Some(6))?;
        let Some(option) = MenuOption::from_number(number) else {
            continue;
        };
        debug!("Menu option selected: {:?}", option);

        match option {
            MenuOption::NewReservation => {
                prompter.clear()?;
                carry_on(new_reservation(ledger, presenter, prompter).await)?;
            }
            MenuOption::FindByGuest => {
                prompter.clear()?;
                prompter.say(presenter.heading("FIND RESERVATIONS"))?;
                let name = prompter.non_empty("Guest name: ", "❌ The name cannot be empty.")?;
                carry_on(handle_find(ledger, presenter, &name, prompter.writer()))?;
            }
            MenuOption::ListAll => {
                prompter.clear()?;
                carry_on(handle_list(ledger, presenter, prompter.writer()))?;
            }
            MenuOption::Cancel => {
                prompter.clear()?;
                prompter.say(presenter.heading("CANCEL RESERVATION"))?;
                let code = prompter.integer("Reservation code: ", Some(0), None)?;
                let id = ReservationId::new(u64::try_from(code).unwrap_or_default());
                carry_on(handle_cancel(ledger, presenter, id, clock(), prompter.writer()).await)?;
            }
            MenuOption::Statistics => {
                prompter.clear()?;
                carry_on(handle_stats(ledger, presenter, prompter.writer()))?;
            }
            MenuOption::Exit => {
                prompter.say(presenter.farewell())?;
                info!("Interactive menu closed");
                return Ok(());
            }
        }

        prompter.pause()?;
    }
}

/// Collect a booking request and submit it
async fn new_reservation<S, R, W>(
    ledger: &mut Ledger<S>,
    presenter: &Presenter,
    prompter: &mut Prompter<R, W>,
) -> Result<()>
where
    S: ReservationStore,
    R: BufRead,
    W: Write,
{
    prompter.say(presenter.heading("NEW RESERVATION"))?;
    prompter.say(presenter.rates(
        ledger
            .catalog()
            .iter()
            .map(|(room_type, spec)| (room_type, spec.nightly_rate)),
    ))?;
    prompter.say("")?;

    let guest_name = prompter.non_empty(
        "Guest responsible for the reservation: ",
        "❌ The name cannot be empty.",
    )?;
    let (check_in, check_out) = prompter.stay()?;
    let room_type = prompter.room_type()?;
    let room_count = prompter.integer("Number of rooms: ", Some(1), None)?;

    let request = BookingRequest {
        guest_name,
        check_in,
        check_out,
        room_type: room_type.as_str().to_string(),
        room_count,
    };

    match ledger.book(request).await {
        Ok(reservation) => {
            prompter.say(presenter.booking_confirmation(&reservation))?;
            Ok(())
        }
        Err(e) => {
            prompter.say(presenter.rejection(&e))?;
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{JsonFileStore, RoomCatalog};
    use crate::config::HotelConfig;
    use chrono::NaiveDate;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 3)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    async fn run_script(temp_dir: &TempDir, script: &str) -> (Result<()>, String, Ledger<JsonFileStore>) {
        let store = JsonFileStore::new(temp_dir.path().join("reservations.json"));
        let mut ledger = Ledger::open(RoomCatalog::default(), store).await.unwrap();
        let presenter = Presenter::new(&HotelConfig::default());
        let mut prompter = Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), false);

        let result = run_menu(&mut ledger, &presenter, &mut prompter, now).await;
        let shown = String::from_utf8(prompter.writer().clone()).unwrap();
        (result, shown, ledger)
    }

    #[tokio::test]
    async fn test_full_session() {
        let temp_dir = TempDir::new().unwrap();
        let script = [
            // Book 7 standard rooms
            "1", "ana souza", "01/01/2025", "05/01/2025", "standard", "7", "",
            // Overlapping request for 4 more is refused
            "1", "bruno", "03/01/2025", "06/01/2025", "standard", "4", "",
            // Departure-day booking fits
            "1", "carla", "05/01/2025", "06/01/2025", "Standard", "3", "",
            "2", "ANA SOUZA", "",
            "3", "",
            "5", "",
            // Cancel an unknown code, then a real one
            "4", "9999", "",
            "4", "1002", "",
            "6",
        ]
        .join("\n")
            + "\n";

        let (result, shown, ledger) = run_script(&temp_dir, &script).await;

        result.unwrap();
        assert!(shown.contains("RESERVATION CONFIRMED"));
        assert!(shown.contains("THIS RESERVATION CANNOT BE MADE"));
        assert!(shown.contains("1 reservation(s) found"));
        assert!(shown.contains("Active reservations: 2"));
        assert!(shown.contains("Reservation 9999 not found"));
        assert!(shown.contains("RESERVATION CANCELLED"));
        assert!(shown.contains("Thank you for choosing Hotel Flor de Lotus!"));

        let remaining: Vec<_> = ledger.reservations().iter().map(|r| r.guest_name.as_str()).collect();
        assert_eq!(remaining, vec!["Ana souza"]);
    }

    #[tokio::test]
    async fn test_invalid_option_is_reprompted() {
        let temp_dir = TempDir::new().unwrap();
        let (result, shown, _) = run_script(&temp_dir, "0\nseven\n6\n").await;

        result.unwrap();
        assert!(shown.contains("at least 1"));
        assert!(shown.contains("whole number"));
    }

    #[tokio::test]
    async fn test_closed_input_ends_session_with_error() {
        let temp_dir = TempDir::new().unwrap();
        let (result, _, _) = run_script(&temp_dir, "3\n").await;

        assert!(result.is_err());
    }
}
