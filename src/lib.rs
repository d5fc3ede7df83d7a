pub mod app;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod handlers;
pub mod models;
pub mod route;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use fetcher::load_feed;
pub use state::AppState;
