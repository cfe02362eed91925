pub mod system_logs;
