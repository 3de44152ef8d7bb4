pub mod auth;
pub mod backup;
pub mod calculator;
pub mod ledger;
pub mod log;
pub mod store;
