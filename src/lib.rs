pub mod app;
pub mod config;
pub mod day;
pub mod errors;
pub mod goals;
pub mod handlers;
pub mod meals;
pub mod models;
pub mod rollover;
pub mod state;
pub mod storage;
pub mod tasks;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use rollover::RolloverTimer;
pub use state::AppState;
pub use storage::load_state;
