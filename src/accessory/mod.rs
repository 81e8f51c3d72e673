//! The temperature/humidity accessory: attribute database, persisted
//! state and application wiring.

pub mod app;
pub mod db;
pub mod state;

pub use app::App;
pub use db::Iid;
pub use state::{AccessoryState, STATE_DOMAIN, STATE_KEY, StateManager};
