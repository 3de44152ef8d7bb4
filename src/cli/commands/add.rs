use crate::cli::commands::{caller_for, open_ledger};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::models::shift::Shift;
use crate::ui::messages::{success, warning};
use crate::utils::colors::{RESET, color_for_buffer};
use crate::utils::date;
use crate::utils::{fmt_litres, fmt_reading};

/// Append a new hour-meter reading.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        unit,
        ending,
        date: date_arg,
        shift,
    } = &cli.command
    {
        //
        // 1. Parse date (default = today)
        //
        let d = date::parse_date_or_today(date_arg.as_deref())
            .ok_or_else(|| AppError::InvalidDate(date_arg.clone().unwrap_or_default()))?;

        //
        // 2. Parse shift (optional)
        //
        let shift_parsed = match shift {
            Some(code) => Some(Shift::from_code(code).ok_or_else(|| {
                AppError::InvalidShift(format!("'{}'. Use 1 or 2", code))
            })?),
            None => None,
        };

        //
        // 3. Open ledger and resolve caller
        //
        let mut ledger = open_ledger(cfg)?;
        let caller = caller_for(&ledger, cli.user.as_deref(), cli.password.as_deref())?;

        //
        // 4. Append
        //
        let result = ledger.append_record(&caller, unit, *ending, d, shift_parsed);
        let conn = ledger.store().conn();

        let outcome = match result {
            Ok(o) => o,
            Err(e) => {
                audit(
                    conn,
                    "add_rejected",
                    &unit.trim().to_uppercase(),
                    &format!("{} by {}: {}", fmt_reading(*ending), caller.username, e),
                );
                return Err(e);
            }
        };

        let r = &outcome.record;
        audit(
            conn,
            "add",
            &r.unit,
            &format!(
                "#{} {} {} {} -> {} by {}",
                r.id,
                r.date_str(),
                if r.shift_label().is_empty() { "-" } else { r.shift_label() },
                fmt_reading(r.starting_reading),
                fmt_reading(r.ending_reading),
                r.recorded_by
            ),
        );

        //
        // 5. Report
        //
        success(format!("Record #{} saved for unit {}", r.id, r.unit));
        println!("  Date            : {}", r.date_str());
        println!(
            "  Shift           : {}",
            if r.shift_label().is_empty() { "-" } else { r.shift_label() }
        );
        println!("  Starting HM     : {}", fmt_reading(r.starting_reading));
        println!("  Ending HM       : {}", fmt_reading(r.ending_reading));
        println!("  HM delta        : {}", fmt_reading(r.delta));
        println!(
            "  Consumption     : {} ({} L/HM)",
            fmt_litres(r.consumption),
            r.ration_rate
        );
        println!(
            "  Buffer stock    : {}{}{}",
            color_for_buffer(r.buffer_stock),
            fmt_litres(r.buffer_stock),
            RESET
        );

        for w in &outcome.warnings {
            warning(w);
        }
    }

    Ok(())
}
