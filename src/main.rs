use anyhow::Context;
use clap::Parser;
use growth_screen::core::chart::{chart_data, ChartData};
use growth_screen::core::guidance::{guidance, FollowUp, Guidance};
use growth_screen::domain::ports::ReferenceSource;
use growth_screen::utils::error::ErrorSeverity;
use growth_screen::utils::{logger, validation::sanitize_measurement, validation::Validate};
use growth_screen::{
    risk_categories, AssessmentInput, AssessmentResult, BatchEngine, BatchSettings, CliConfig,
    Command, CsvBatchPipeline, GrowthEngine, GrowthError, LocalStorage, ReferenceData,
    RiskSelection, ScreeningConfig, Sex,
};
use serde::Serialize;

#[derive(Serialize)]
struct AssessmentReport<'a> {
    sex: Sex,
    age_months: f64,
    weight_kg: f64,
    risks: &'a [&'static str],
    result: &'a AssessmentResult,
    guidance: &'a Guidance,
    follow_up: FollowUp,
}

fn load_config(cli: &CliConfig) -> anyhow::Result<ScreeningConfig> {
    let config = match &cli.config {
        Some(path) => ScreeningConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path.display()))?,
        None => ScreeningConfig::default(),
    };
    Ok(config)
}

fn run(cli: CliConfig, config: ScreeningConfig) -> Result<(), GrowthError> {
    config.validate()?;
    let reference = match config.reference_data()? {
        Some(custom) => {
            tracing::info!("Using reference tables from configuration");
            custom
        }
        None => ReferenceData::simplified().clone(),
    };
    let engine = GrowthEngine::new(reference)?;

    match cli.command {
        Command::Assess {
            sex,
            age,
            weight,
            risks,
            date,
            json,
        } => {
            let sex: Sex = sex.parse()?;
            let age_months = sanitize_measurement("age", &age, config.age_bounds());
            let weight_kg = sanitize_measurement("weight", &weight, config.weight_bounds());
            let selection = RiskSelection::from_keys(&risks)?;

            let result = engine.assess(&AssessmentInput {
                age_months,
                weight_kg,
                sex,
            });
            let months = config.review_months();
            let advice = guidance(&result, weight_kg, selection.count(), months);
            let assessed_on = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let follow_up = FollowUp::from_date(assessed_on, months);

            if json {
                let report = AssessmentReport {
                    sex,
                    age_months,
                    weight_kg,
                    risks: selection.keys(),
                    result: &result,
                    guidance: &advice,
                    follow_up,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_assessment(sex, age_months, weight_kg, &result, &advice, &follow_up);
            }
        }
        Command::Curves { sex, json } => {
            let sex: Sex = sex.parse()?;
            let chart = chart_data(engine.source().curve_set(sex), None);
            if json {
                println!("{}", serde_json::to_string_pretty(&chart)?);
            } else {
                print_curves(sex, &chart);
            }
        }
        Command::Risks { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(risk_categories())?);
            } else {
                for category in risk_categories() {
                    println!("{} ({})", category.title, category.key);
                    for item in category.items {
                        println!("  {:<22} {}", item.key, item.label);
                    }
                }
            }
        }
        Command::Batch { input, output } => {
            let mut settings = BatchSettings::new(input, output);
            settings.age_bounds = config.age_bounds();
            settings.weight_bounds = config.weight_bounds();

            let pipeline = CsvBatchPipeline::new(LocalStorage::new("."), engine, settings);
            let (path, summary) = BatchEngine::new(pipeline).run()?;
            println!(
                "✅ Screened {} children ({} under, {} within, {} over)",
                summary.total(),
                summary.under,
                summary.within,
                summary.over
            );
            println!("📁 Report saved to: {}", path);
        }
    }

    Ok(())
}

fn print_assessment(
    sex: Sex,
    age_months: f64,
    weight_kg: f64,
    result: &AssessmentResult,
    advice: &Guidance,
    follow_up: &FollowUp,
) {
    println!(
        "{} {:.1} months, {:.2} kg: {}",
        sex, age_months, weight_kg, result.label
    );
    println!(
        "Centiles: P15 {:.2} kg, P50 {:.2} kg, P85 {:.2} kg",
        result.p15, result.p50, result.p85
    );
    if !advice.next_step.is_empty() {
        println!("\nNext best step: {}", advice.next_step);
    }
    for step in &advice.actions {
        println!("  - {}", step.label);
    }
    println!("\n{}", advice.risk_note);

    if let Some(plan) = &advice.intervention {
        println!("\n{}", plan.title);
        for section in &plan.sections {
            println!("  {}: {}", section.heading, section.text);
        }
        println!("\nResources and Fact Sheets");
        for link in plan.resources {
            println!("  {} <{}>", link.title, link.url);
        }
    }
    println!("\nReview due: {}", follow_up.review_due);
}

fn print_curves(sex: Sex, chart: &ChartData) {
    println!("Weight-for-age centiles ({}), kg", sex);
    let header: Vec<&str> = chart.series.iter().map(|s| s.percentile.as_str()).collect();
    println!("{:>5}  {}", "month", header.join("   "));
    for (i, point) in chart.series[0].points.iter().enumerate() {
        let row: Vec<String> = chart
            .series
            .iter()
            .map(|s| format!("{:5.1}", s.points[i].y))
            .collect();
        println!("{:>5}  {}", point.x, row.join(" "));
    }
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();
    let config = load_config(&cli)?;

    logger::init_logger(cli.verbose, config.log_level(), config.log_format());
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(cli, config) {
        tracing::error!(
            "❌ Screening failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
