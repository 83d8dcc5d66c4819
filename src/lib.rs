pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use self::config::{cli::LocalStorage, toml_config::ScreeningConfig};

#[cfg(feature = "cli")]
pub use self::config::{CliConfig, Command};

pub use self::core::{
    batch::{BatchEngine, BatchSettings, CsvBatchPipeline},
    engine::{classify, interpolate_at, GrowthEngine},
    guidance::{guidance, FollowUp, Guidance},
    reference::{reference_set, ReferenceData},
};
pub use domain::model::{AssessmentInput, AssessmentResult, Classification, Sex};
pub use domain::risk::{risk_categories, RiskSelection};
pub use utils::error::{GrowthError, Result};
