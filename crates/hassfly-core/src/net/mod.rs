// ── Network-status probe ──
//
// Backend selection, process invocation, and text parsing for the OS
// network manager. The probe is the only place the crate shells out.

pub mod backend;
pub mod nmcli;
pub mod parse;

pub use backend::{NetworkBackend, NetworkTool, backend_for};
pub use nmcli::NmcliBackend;
pub use parse::{parse_connections, parse_wifi_list};
