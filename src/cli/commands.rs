//! Command handlers for Hotel Ledger CLI
//!
//! This module implements the handlers that connect CLI arguments and menu
//! choices to the ledger. Handlers write to any `Write` so the one-shot
//! subcommands and the interactive menu share them. Refused operations are
//! reported to the user and then returned as errors, so callers can decide
//! whether to carry on.

use std::io::Write;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::app::{Ledger, ReservationId, ReservationStore};
use crate::cli::args::{BookArgs, PeriodArgs};
use crate::cli::display::Presenter;
use crate::errors::{ReservationError, ReservationResult, Result};

/// Write the user-facing explanation of a refusal and pass the error on
fn report<T>(
    presenter: &Presenter,
    out: &mut impl Write,
    result: ReservationResult<T>,
) -> Result<T> {
    result.or_else(|e| {
        writeln!(out, "{}", presenter.rejection(&e))?;
        Err(e.into())
    })
}

/// Handle the book command
///
/// With `dry_run` the request is only validated, checked against the
/// inventory and priced.
pub async fn handle_book<S: ReservationStore>(
    ledger: &mut Ledger<S>,
    presenter: &Presenter,
    args: &BookArgs,
    out: &mut impl Write,
) -> Result<()> {
    let request = args.to_request();

    if args.dry_run {
        let booking = report(presenter, out, ledger.check(&request))?;
        let price = report(presenter, out, ledger.quote(&request))?;
        writeln!(
            out,
            "✅ {} {} room(s) are available for {} night(s): {}",
            booking.room_count,
            booking.room_type,
            booking.nights(),
            presenter.money(price)
        )?;
        return Ok(());
    }

    let reservation = report(presenter, out, ledger.book(request).await)?;
    writeln!(out, "{}", presenter.booking_confirmation(&reservation))?;
    Ok(())
}

/// Handle the find command
pub fn handle_find<S: ReservationStore>(
    ledger: &Ledger<S>,
    presenter: &Presenter,
    name: &str,
    out: &mut impl Write,
) -> Result<()> {
    let found = ledger.find_by_guest(name);
    if found.is_empty() {
        writeln!(out, "No reservations found for '{}'.", name.trim())?;
        return Ok(());
    }

    writeln!(out, "{} reservation(s) found:\n", found.len())?;
    writeln!(out, "{}", presenter.reservation_list(&found))?;
    Ok(())
}

/// Handle the list command
pub fn handle_list<S: ReservationStore>(
    ledger: &Ledger<S>,
    presenter: &Presenter,
    out: &mut impl Write,
) -> Result<()> {
    let all: Vec<_> = ledger.reservations().iter().collect();
    debug!("Listing {} reservations", all.len());

    if all.is_empty() {
        writeln!(out, "No reservations registered.")?;
        return Ok(());
    }

    writeln!(out, "{}", presenter.heading("ALL RESERVATIONS"))?;
    writeln!(out, "{}", presenter.reservation_list(&all))?;
    Ok(())
}

/// Handle the cancel command
pub async fn handle_cancel<S: ReservationStore>(
    ledger: &mut Ledger<S>,
    presenter: &Presenter,
    id: ReservationId,
    now: NaiveDateTime,
    out: &mut impl Write,
) -> Result<()> {
    info!("Cancelling reservation {}", id);
    let cancelled = report(presenter, out, ledger.cancel(id, now).await)?;
    writeln!(out, "{}", presenter.cancellation_confirmation(&cancelled))?;
    Ok(())
}

/// Handle the stats command
pub fn handle_stats<S: ReservationStore>(
    ledger: &Ledger<S>,
    presenter: &Presenter,
    out: &mut impl Write,
) -> Result<()> {
    match ledger.statistics() {
        Ok(stats) => writeln!(out, "{}", presenter.statistics(&stats))?,
        Err(ReservationError::Empty) => writeln!(out, "No reservations registered yet.")?,
        Err(e) => return report(presenter, out, Err(e)),
    }
    Ok(())
}

/// Handle the availability command
pub fn handle_availability<S: ReservationStore>(
    ledger: &Ledger<S>,
    presenter: &Presenter,
    period: &PeriodArgs,
    out: &mut impl Write,
) -> Result<()> {
    let report_rows = report(
        presenter,
        out,
        ledger.availability(period.check_in, period.check_out),
    )?;
    writeln!(
        out,
        "{}",
        presenter.heading(&format!(
            "AVAILABILITY {} TO {}",
            period.check_in.format(crate::constants::display::DATE_FORMAT),
            period.check_out.format(crate::constants::display::DATE_FORMAT)
        ))
    )?;
    writeln!(out, "{}", presenter.availability(&report_rows))?;
    Ok(())
}
