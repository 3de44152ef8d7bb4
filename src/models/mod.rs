pub mod caller;
pub mod record;
pub mod shift;
pub mod unit;
