//! Terminal messages. `info` and `success` go to stdout,
//! `warning` and `error` to stderr so piped listings stay clean.

use ansi_term::{Colour, Style};
use std::fmt;

fn tagged(style: Style, icon: &str, msg: impl fmt::Display) -> String {
    format!("{} {}", style.paint(icon), msg)
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", tagged(Colour::Blue.bold(), "ℹ️", msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", tagged(Colour::Green.bold(), "✅", msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    eprintln!("{}", tagged(Colour::Yellow.bold(), "⚠️", msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", tagged(Colour::Red.bold(), "❌", msg));
}
