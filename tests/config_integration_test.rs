use anyhow::Result;
use growth_screen::utils::validation::Validate;
use growth_screen::{Classification, GrowthEngine, GrowthError, ScreeningConfig, Sex};
use std::io::Write;
use tempfile::NamedTempFile;

fn flat(weight: f64) -> String {
    let values = vec![format!("{:.1}", weight); 25];
    format!("[{}]", values.join(", "))
}

#[test]
fn test_custom_tables_drive_classification() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        "[reference.male]\np15 = {}\np50 = {}\np85 = {}\n\n[reference.female]\np15 = {}\np50 = {}\np85 = {}\n",
        flat(5.0),
        flat(6.0),
        flat(7.0),
        flat(4.0),
        flat(5.0),
        flat(6.0)
    )?;

    let config = ScreeningConfig::from_file(file.path())?;
    config.validate()?;
    let data = config.reference_data()?.expect("custom tables");
    let engine = GrowthEngine::new(data)?;

    assert_eq!(engine.classify(6.0, 4.5, Sex::Male).classification, Classification::Under);
    assert_eq!(engine.classify(6.0, 4.5, Sex::Female).classification, Classification::Within);
    assert_eq!(engine.classify(18.0, 7.5, Sex::Male).classification, Classification::Over);
    Ok(())
}

#[test]
fn test_crossed_custom_tables_are_fatal() -> Result<()> {
    let content = format!(
        "[reference.male]\np15 = {}\np50 = {}\np85 = {}\n\n[reference.female]\np15 = {}\np50 = {}\np85 = {}\n",
        flat(7.0),
        flat(6.0),
        flat(5.0),
        flat(4.0),
        flat(5.0),
        flat(6.0)
    );
    let config = ScreeningConfig::from_toml_str(&content)?;
    let err = config.validate().unwrap_err();
    assert!(matches!(err, GrowthError::ReferenceTableError { .. }));
    assert_eq!(
        err.severity(),
        growth_screen::utils::error::ErrorSeverity::Critical
    );
    Ok(())
}
