use crate::cli::commands::open_ledger;
use crate::config::Config;
use crate::core::store::LedgerStore;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::table::{Column, Table};
use crate::utils::{fmt_litres, fmt_reading};

/// Print the configured unit tables with each unit's current reading.
pub fn handle(cfg: &Config) -> AppResult<()> {
    let ledger = open_ledger(cfg)?;
    let catalog = ledger.catalog();

    if catalog.codes().is_empty() {
        info("No units configured.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::left("Unit"),
        Column::right("Rate (L/HM)"),
        Column::right("Tank"),
        Column::right("Initial HM"),
        Column::right("Current HM"),
        Column::right("Records"),
    ]);

    for spec in catalog.specs() {
        let records = ledger.store().read_unit(&spec.code)?;
        table.add_row(vec![
            spec.code.clone(),
            format!("{}", spec.ration_rate),
            fmt_litres(spec.tank_capacity),
            fmt_reading(spec.initial_reading),
            fmt_reading(ledger.get_running_reading(&spec.code)?),
            records.len().to_string(),
        ]);
    }

    print!("{}", table.render());

    if !catalog.is_strict() {
        info(format!(
            "Unlisted units are accepted with rate {}, tank {} and initial HM {}.",
            cfg.default_ration_rate,
            fmt_litres(cfg.default_tank_capacity),
            fmt_reading(cfg.default_initial_reading)
        ));
    }

    Ok(())
}
