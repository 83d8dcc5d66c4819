pub mod batch;
pub mod chart;
pub mod engine;
pub mod guidance;
pub mod reference;

pub use crate::domain::model::{AssessmentInput, AssessmentResult, Classification, Sex};
pub use crate::domain::ports::{Pipeline, ReferenceSource, Storage};
pub use crate::utils::error::Result;
