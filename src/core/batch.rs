//! Screening many children at once from a CSV file.

use crate::core::engine::GrowthEngine;
use crate::core::guidance::intervention_focus;
use crate::domain::model::{AssessmentInput, Classification, Sex};
use crate::domain::ports::{Pipeline, ReferenceSource, Storage};
use crate::domain::risk::RiskSelection;
use crate::utils::error::{GrowthError, Result};
use crate::utils::validation::{sanitize_measurement, MeasurementBounds, AGE_BOUNDS, WEIGHT_BOUNDS};
use serde::{Deserialize, Serialize};

/// One input row: `id,age_months,weight_kg,sex,risks`. Measurements stay
/// as text so they go through the same lenient parsing as typed input.
#[derive(Debug, Clone, Deserialize)]
pub struct ScreeningRecord {
    #[serde(skip)]
    pub line: usize,
    pub id: String,
    pub age_months: String,
    pub weight_kg: String,
    pub sex: String,
    #[serde(default)]
    pub risks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningOutcome {
    pub id: String,
    pub age_months: f64,
    pub weight_kg: f64,
    pub sex: Sex,
    pub risk_count: usize,
    pub p15: f64,
    pub p50: f64,
    pub p85: f64,
    pub classification: Classification,
    pub label: &'static str,
    pub intervention: String,
}

#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub input_path: String,
    pub output_path: String,
    pub age_bounds: MeasurementBounds,
    pub weight_bounds: MeasurementBounds,
}

impl BatchSettings {
    pub fn new(input_path: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            age_bounds: AGE_BOUNDS,
            weight_bounds: WEIGHT_BOUNDS,
        }
    }
}

pub struct CsvBatchPipeline<S: Storage, R: ReferenceSource> {
    storage: S,
    engine: GrowthEngine<R>,
    settings: BatchSettings,
}

impl<S: Storage, R: ReferenceSource> CsvBatchPipeline<S, R> {
    pub fn new(storage: S, engine: GrowthEngine<R>, settings: BatchSettings) -> Self {
        Self {
            storage,
            engine,
            settings,
        }
    }

    fn screen(&self, record: ScreeningRecord) -> Result<ScreeningOutcome> {
        let row_error = |err: GrowthError| GrowthError::ProcessingError {
            message: format!("row {} (id {}): {}", record.line, record.id, err),
        };

        let sex: Sex = record.sex.parse().map_err(row_error)?;
        let risk_keys = record
            .risks
            .as_deref()
            .unwrap_or("")
            .split(';')
            .map(str::trim)
            .filter(|key| !key.is_empty());
        let risks = RiskSelection::from_keys(risk_keys).map_err(row_error)?;

        let age_months =
            sanitize_measurement("age_months", &record.age_months, self.settings.age_bounds);
        let weight_kg =
            sanitize_measurement("weight_kg", &record.weight_kg, self.settings.weight_bounds);
        let result = self.engine.assess(&AssessmentInput {
            age_months,
            weight_kg,
            sex,
        });
        let intervention = intervention_focus(result.classification, risks.count())
            .map(|focus| focus.title().to_string())
            .unwrap_or_default();

        Ok(ScreeningOutcome {
            id: record.id,
            age_months,
            weight_kg,
            sex,
            risk_count: risks.count(),
            p15: result.p15,
            p50: result.p50,
            p85: result.p85,
            classification: result.classification,
            label: result.label,
            intervention,
        })
    }
}

impl<S: Storage, R: ReferenceSource> Pipeline for CsvBatchPipeline<S, R> {
    type Record = ScreeningRecord;
    type Outcome = ScreeningOutcome;

    fn extract(&self) -> Result<Vec<ScreeningRecord>> {
        let data = self.storage.read_file(&self.settings.input_path)?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data.as_slice());

        let headers = reader.headers()?.clone();
        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let mut record: ScreeningRecord = row.deserialize(Some(&headers))?;
            // physical line where the record starts, quoted newlines included
            record.line = row.position().map_or(0, |pos| pos.line() as usize);
            records.push(record);
        }
        Ok(records)
    }

    fn transform(&self, records: Vec<ScreeningRecord>) -> Result<Vec<ScreeningOutcome>> {
        records
            .into_iter()
            .map(|record| self.screen(record))
            .collect()
    }

    fn load(&self, outcomes: Vec<ScreeningOutcome>) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for outcome in &outcomes {
            writer.serialize(outcome)?;
        }
        let data = writer
            .into_inner()
            .map_err(|e| GrowthError::IoError(e.into_error()))?;

        tracing::debug!("Writing {} bytes to {}", data.len(), self.settings.output_path);
        self.storage.write_file(&self.settings.output_path, &data)?;
        Ok(self.settings.output_path.clone())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub under: usize,
    pub within: usize,
    pub over: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[ScreeningOutcome]) -> Self {
        outcomes
            .iter()
            .fold(Self::default(), |mut summary, outcome| {
                match outcome.classification {
                    Classification::Under => summary.under += 1,
                    Classification::Within => summary.within += 1,
                    Classification::Over => summary.over += 1,
                }
                summary
            })
    }

    pub fn total(&self) -> usize {
        self.under + self.within + self.over
    }
}

pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P> BatchEngine<P>
where
    P: Pipeline<Outcome = ScreeningOutcome>,
{
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract, transform and load. Returns where the report went.
    pub fn run(&self) -> Result<(String, BatchSummary)> {
        tracing::info!("Starting batch screening");

        let records = self.pipeline.extract()?;
        tracing::info!("Read {} records", records.len());

        let outcomes = self.pipeline.transform(records)?;
        let summary = BatchSummary::from_outcomes(&outcomes);
        tracing::info!(
            "Screened {} children: {} under, {} within, {} over",
            summary.total(),
            summary.under,
            summary.within,
            summary.over
        );

        let output_path = self.pipeline.load(outcomes)?;
        tracing::info!("Report saved to: {}", output_path);

        Ok((output_path, summary))
    }
}
