pub mod converter;
pub mod health;
pub mod types;

pub use converter::{ConverterService, converter_routes};
pub use health::{AppStartTime, HealthService, health_routes};
