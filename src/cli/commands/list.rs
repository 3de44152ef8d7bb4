use crate::cli::commands::{open_ledger, record_filter};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::RecordExport;
use crate::ui::messages::info;
use crate::utils::table::{Column, Table};
use crate::utils::{fmt_litres, fmt_reading};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { unit, range, shift } = cmd {
        let filter = record_filter(unit.as_deref(), range.as_deref(), shift.as_deref())?;
        let ledger = open_ledger(cfg)?;
        let records = ledger.export_filtered(&filter)?;

        if records.is_empty() {
            info("No records found.");
            return Ok(());
        }

        print_records(&records);
        println!("{} record(s). * = latest reading of the unit", records.len());
    }
    Ok(())
}

fn print_records(records: &[RecordExport]) {
    let mut table = Table::new(vec![
        Column::right("#"),
        Column::left("Date"),
        Column::left("Unit"),
        Column::left("Shift"),
        Column::right("HM Start"),
        Column::right("HM End"),
        Column::right("Delta"),
        Column::right("Rate"),
        Column::right("Consumption"),
        Column::right("Buffer"),
        Column::left(""),
        Column::left("By"),
    ]);

    for r in records {
        table.add_row(vec![
            r.id.to_string(),
            r.date.clone(),
            r.unit.clone(),
            if r.shift.is_empty() { "-".into() } else { r.shift.clone() },
            fmt_reading(r.hm_start),
            fmt_reading(r.hm_end),
            fmt_reading(r.delta),
            format!("{}", r.ration_rate),
            fmt_litres(r.consumption),
            fmt_litres(r.buffer_stock),
            if r.is_latest { "*".into() } else { String::new() },
            r.recorded_by.clone(),
        ]);
    }

    print!("{}", table.render());
}
