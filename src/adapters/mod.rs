pub mod account_stores;
pub mod event_logs;
