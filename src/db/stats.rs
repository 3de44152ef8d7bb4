use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::NaiveDate;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) TOTALS
    //
    let count: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
    let units: i64 = pool
        .conn
        .query_row("SELECT COUNT(DISTINCT unit) FROM records", [], |row| {
            row.get(0)
        })?;
    let users: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;

    println!(
        "{}• Total records:{} {}{}{}",
        CYAN, RESET, GREEN, count, RESET
    );
    println!("{}• Units with records:{} {}", CYAN, RESET, units);
    println!("{}• Registered users:{} {}", CYAN, RESET, users);

    //
    // 3) DATE RANGE
    //
    let (first_date, last_date): (Option<String>, Option<String>) = pool
        .conn
        .query_row("SELECT MIN(date), MAX(date) FROM records", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .optional()?
        .unwrap_or((None, None));

    let fmt_first = first_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = last_date
        .clone()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) AVERAGE RECORDS/DAY
    //
    if let (Some(f), Some(l)) = (first_date, last_date)
        && let (Ok(d1), Ok(d2)) = (
            NaiveDate::parse_from_str(&f, "%Y-%m-%d"),
            NaiveDate::parse_from_str(&l, "%Y-%m-%d"),
        )
    {
        let days = (d2 - d1).num_days().max(1);
        let avg = count as f64 / days as f64;
        println!("{}• Average records/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}
