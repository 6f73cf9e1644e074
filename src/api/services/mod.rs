pub mod analyze;
pub mod frontend;
pub mod health;

pub use analyze::AnalyzeService;
pub use frontend::FrontendService;
pub use health::{AppStartTime, HealthService};
