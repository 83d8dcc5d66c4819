use crate::domain::model::{ReferenceCurveSet, Sex};
use crate::utils::error::Result;

/// Supplies the percentile curves the engine interpolates over.
pub trait ReferenceSource: Send + Sync {
    fn curve_set(&self, sex: Sex) -> &ReferenceCurveSet;
}

impl<R: ReferenceSource + ?Sized> ReferenceSource for &R {
    fn curve_set(&self, sex: Sex) -> &ReferenceCurveSet {
        (**self).curve_set(sex)
    }
}

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait Pipeline {
    type Record;
    type Outcome;

    fn extract(&self) -> Result<Vec<Self::Record>>;
    fn transform(&self, records: Vec<Self::Record>) -> Result<Vec<Self::Outcome>>;
    fn load(&self, outcomes: Vec<Self::Outcome>) -> Result<String>;
}
