use crate::errors::AppResult;
use crate::ui::messages::info;
use ansi_term::Colour;
use regex::Regex;
use rusqlite::Connection;
use std::sync::LazyLock;

const OP_COLUMN_MAX: usize = 60;

static ANSI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1B\[[0-9;]*[mK]").unwrap_or_else(|_| unreachable!("static pattern"))
});

fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// ANSI color for each audited operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "add_rejected" => Colour::Yellow,
        "reset" => Colour::Red,
        "user_add" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "backup" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub struct LogLogic;

impl LogLogic {
    pub fn load(conn: &Connection) -> AppResult<Vec<LogEntry>> {
        let mut stmt = conn.prepare_cached(
            "SELECT id, date, operation, COALESCE(target, ''), message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let raw_date: String = row.get(1)?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok(LogEntry {
                id: row.get(0)?,
                date,
                operation: row.get(2)?,
                target: row.get(3)?,
                message: row.get(4)?,
            })
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }
        Ok(entries)
    }

    pub fn print_log(conn: &Connection) -> AppResult<()> {
        let entries = Self::load(conn)?;

        if entries.is_empty() {
            info("Internal log is empty.");
            return Ok(());
        }

        let op_targets: Vec<String> = entries
            .iter()
            .map(|e| {
                let colored = color_for_operation(&e.operation)
                    .paint(e.operation.as_str())
                    .to_string();
                if e.target.is_empty() {
                    colored
                } else {
                    format!("{colored} ({})", e.target)
                }
            })
            .collect();

        let op_w = op_targets
            .iter()
            .map(|s| strip_ansi(s).chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_COLUMN_MAX);
        let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for (e, op_target) in entries.iter().zip(op_targets) {
            let shown = truncate_visible(&op_target, &e.operation);
            let visible_len = strip_ansi(&shown).chars().count();
            let padding = " ".repeat(op_w.saturating_sub(visible_len));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                e.date,
                shown,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

/// Cut the op/target column to `OP_COLUMN_MAX` visible chars,
/// keeping only the operation word colored.
fn truncate_visible(colored: &str, operation: &str) -> String {
    let visible = strip_ansi(colored);
    if visible.chars().count() <= OP_COLUMN_MAX {
        return colored.to_string();
    }

    let mut cut: String = visible.chars().take(OP_COLUMN_MAX - 3).collect();
    cut.push_str("...");

    let color = color_for_operation(operation);
    match cut.split_once(' ') {
        Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
        None => color.paint(cut.as_str()).to_string(),
    }
}
