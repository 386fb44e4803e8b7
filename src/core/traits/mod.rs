pub mod account_store;
pub mod event_log;
