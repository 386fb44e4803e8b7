pub mod account_registry;
pub mod account_service;
pub mod event_log_engine;
