pub mod model;
pub mod quadrature;
pub mod report;

pub use model::LearningModel;
pub use report::{AnalysisReport, analyze};
