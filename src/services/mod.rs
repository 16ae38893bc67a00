pub mod mail_relay;
pub mod tip_flag;
pub mod tracing_setup;
