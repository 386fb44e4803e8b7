pub mod memory_account_store;
