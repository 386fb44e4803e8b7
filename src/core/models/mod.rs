pub mod account;
pub mod api_response;
pub mod event;
pub mod log_query;
pub mod timestamp;
