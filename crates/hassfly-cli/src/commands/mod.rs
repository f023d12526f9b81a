//! Command handlers: CLI args → core operations → output formatting.

pub mod config_cmd;
pub mod entities;
pub mod networks;
pub mod template;
