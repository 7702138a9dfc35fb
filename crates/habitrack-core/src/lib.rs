//! Core library for the habitrack client.
//!
//! Configuration, client storage, the REST API client with its auth guard,
//! and the state containers and flows shared by the TUI and CLI front ends.

pub mod alert;
pub mod api;
pub mod config;
pub mod daily;
pub mod guard;
pub mod habits;
pub mod logging;
pub mod points;
pub mod session;
pub mod storage;
pub mod validation;
