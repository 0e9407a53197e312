pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod view;

pub use config::DashboardConfig;
pub use errors::{ClientError, ConfigError};
pub use services::controller::{DashboardController, DashboardState, PollingHandle, SearchOutcome};
pub use services::index_client::{HttpIndexClient, IndexService};
pub use view::DashboardView;
