//! Provision ONTAP qtrees with tree quota rules over the REST API.
//!
//! Layers, innermost first:
//! - `domain`: request payloads and provisioning outcomes
//! - `application`: the provisioning service
//! - `infrastructure`: REST client, password prompt, DI container
//! - `cli`: argument parsing, command execution, terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
