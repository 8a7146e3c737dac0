//! HTTP handlers. Each submodule exposes its handlers plus a `*_routes()`
//! constructor that `crate::app_routes` merges.

pub mod forms;
pub mod health;
pub mod seeds;

pub use crate::AppState;
