//! Core agent-based "city lights" growth simulation library.
//!
//! Main components:
//! - [`grid`] — the 8-bit intensity grid and radial bloom deposits.
//! - [`agent`] — road-builder agents and cardinal direction helpers.
//! - [`engine`] — the growth engine: stepping, branching, respawn,
//!   bright-node events, decay.
//! - [`config`] — tunable simulation parameters.

pub mod agent;
pub mod config;
pub mod engine;
pub mod grid;
