pub mod colors;
pub mod date;
pub mod formatting;
pub mod path;
pub mod table;

pub use formatting::fmt_litres;
pub use formatting::fmt_reading;
