pub mod memory_event_log;
