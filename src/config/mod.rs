pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use args::{CliConfig, Command};

#[cfg(feature = "cli")]
mod args {
    use clap::{Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "growth-screen")]
    #[command(about = "Weight-for-age screening against 15th/50th/85th centile curves (0-24 months)")]
    pub struct CliConfig {
        /// Path to TOML configuration file
        #[arg(short, long, global = true)]
        pub config: Option<PathBuf>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Assess one child and print the next best step
        Assess {
            #[arg(long)]
            sex: String,

            /// Age in months; a comma decimal separator is accepted
            #[arg(long, allow_hyphen_values = true)]
            age: String,

            /// Weight in kg; a comma decimal separator is accepted
            #[arg(long, allow_hyphen_values = true)]
            weight: String,

            /// Risk factor key, repeatable (see `risks`)
            #[arg(long = "risk", value_delimiter = ',')]
            risks: Vec<String>,

            /// Assessment date (YYYY-MM-DD), defaults to today
            #[arg(long)]
            date: Option<chrono::NaiveDate>,

            #[arg(long)]
            json: bool,
        },

        /// Print the centile curves for charting
        Curves {
            #[arg(long)]
            sex: String,

            #[arg(long)]
            json: bool,
        },

        /// List the bio-psycho-social risk factor keys
        Risks {
            #[arg(long)]
            json: bool,
        },

        /// Screen every row of a CSV file (id,age_months,weight_kg,sex,risks)
        Batch {
            #[arg(short, long)]
            input: String,

            #[arg(short, long, default_value = "screening_report.csv")]
            output: String,
        },
    }
}
