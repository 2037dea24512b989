/*
[INPUT]:  CLI modules
[OUTPUT]: Reusable command and configuration surface of the msgraph binary
[POS]:    Library root for the CLI crate
[UPDATE]: When adding CLI modules
*/

pub mod commands;
pub mod config;

pub use commands::{Command, GroupCommand, ListArgs, ReportCommand, UserCommand};
pub use config::{AuthConfig, GraphConfig};
