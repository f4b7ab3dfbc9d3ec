//! Library entry for Trendsea exposing core logic for integration tests.

pub mod ai;
pub mod countries;
pub mod events;
pub mod logic;
pub mod snapshot;
pub mod sources;
pub mod state;
pub mod theme;
pub mod ui;
pub mod util;
