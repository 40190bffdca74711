// Public API for integration tests and potential library usage

pub mod config;
pub mod deck;
pub mod error;
pub mod fanout;
pub mod protocol;
pub mod reconcile;
pub mod registry;
pub mod room;
pub mod state;
pub mod types;
pub mod ws;
