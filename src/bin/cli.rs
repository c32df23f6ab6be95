//! RefugeeConnect CLI
//!
//! Command-line interface over the application shell:
//! - Dashboard statistics
//! - Filtered registry listing
//! - Batched registration from a JSON file
//! - AI situation report
//! - Default config generation

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use refugee_connect::config::{generate_default_config, Config};
use refugee_connect::gateway::SheetGateway;
use refugee_connect::logging::init_logging;
use refugee_connect::model::{AppRoute, RefugeeDraft};
use refugee_connect::report::{GeminiClient, SituationReporter};
use refugee_connect::shell::AppShell;
use refugee_connect::stats::NameValue;
use refugee_connect::views::{
    route_label, ListFilter, ListView, RegistrationForm, APP_NAME, MAX_ENTRIES,
};

#[derive(Parser)]
#[command(name = "refugee-connect")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Shelter registration and situation overview")]
#[command(long_about = "RefugeeConnect reads and writes shelter registrations kept in a spreadsheet,\nsummarizes them and asks an AI service for a situation report.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: platform config dir, then ./config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show dashboard statistics
    Dashboard,

    /// List registered people
    List {
        /// Match first name, last name or shelter (case-insensitive)
        #[arg(short, long, default_value = "")]
        search: String,
        /// Only this shelter ("all" for every shelter)
        #[arg(long, default_value = "all")]
        shelter: String,
    },

    /// Register one to five people from a JSON array of entries
    Register {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Generate an AI situation report
    Report,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_ref());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    config.logging.level = if cli.verbose { "debug" } else { "warn" }.to_string();
    init_logging(&config.logging);

    if config.sheet.url.trim().is_empty() {
        eprintln!("Warning: no sheet endpoint configured (set REFUGEE_CONNECT_SHEET_URL)");
    }

    let gateway = SheetGateway::new(config.sheet.to_sheet_config())
        .context("failed to build sheet client")?;
    let mut shell = AppShell::new(Arc::new(gateway));
    let json = cli.format == "json";

    match cli.command {
        Commands::Dashboard => {
            shell.navigate(AppRoute::Dashboard).await;
            let view = shell.dashboard();

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
                return Ok(());
            }

            println!("{} - {}", APP_NAME, route_label(AppRoute::Dashboard));
            println!();
            println!("Total registered:   {}", view.stats.total);
            println!("Medical cases:      {}", view.stats.medical_cases);
            println!("Critical rate:      {}%", view.critical_rate_display);
            println!("Shelters:           {}", view.stats.shelter_distribution.len());
            print_distribution("Shelter distribution", &view.stats.shelter_distribution);
            print_distribution("Gender distribution", &view.stats.gender_distribution);
        }

        Commands::List { search, shelter } => {
            shell.navigate(AppRoute::List).await;
            let view = shell.list(ListFilter::default().search(search).shelter(shelter));

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_list(&view);
            }
        }

        Commands::Register { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {:?}", file))?;
            let entries: Vec<RefugeeDraft> = serde_json::from_str(&content)
                .with_context(|| format!("{:?} is not a JSON array of entries", file))?;

            if entries.is_empty() || entries.len() > MAX_ENTRIES {
                bail!("expected 1 to {} entries, got {}", MAX_ENTRIES, entries.len());
            }

            *shell.form_mut() = RegistrationForm::from_entries(entries)?;
            let outcome = shell.submit_registration(Utc::now().date_naive()).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("{}", outcome.message());
            }

            if !outcome.is_complete() {
                std::process::exit(1);
            }
        }

        Commands::Report => {
            let generator = GeminiClient::new(config.ai.to_gemini_config())
                .context("failed to build AI client")?;
            let reporter = SituationReporter::new(Arc::new(generator), config.ai.key_source())
                .max_medical_needs(config.ai.max_medical_needs);

            shell.navigate(AppRoute::Dashboard).await;
            let mut view = shell.dashboard();
            let report = view.generate_report(&reporter, shell.records()).await;

            if json {
                println!("{}", serde_json::json!({ "report": report }));
            } else {
                println!("{}", report);
            }
        }

        // Written before any config is loaded
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }

    Ok(())
}

fn print_distribution(title: &str, series: &[NameValue]) {
    if series.is_empty() {
        return;
    }

    println!();
    println!("{}:", title);
    for item in series {
        println!("  {:<24} {}", item.name, item.value);
    }
}

fn print_list(view: &ListView) {
    println!("{} - {}", APP_NAME, route_label(AppRoute::List));
    println!("Showing {} of {}", view.matched(), view.total);
    println!();

    if let Some(message) = view.empty_message() {
        println!("{}", message);
        return;
    }

    println!(
        "{:<28} {:<11} {:<20} {:<12} {:>4} {:<6} {:>6}  {:<24} {}",
        "Name", "Date", "Shelter", "Phone", "Age", "Gender", "Family", "Medical", "Status"
    );
    println!("{}", "-".repeat(130));

    for row in &view.rows {
        println!(
            "{:<28} {:<11} {:<20} {:<12} {:>4} {:<6} {:>6}  {:<24} {}",
            row.full_name,
            row.registration_date,
            row.shelter_name,
            row.phone,
            row.age,
            row.gender,
            row.family_size,
            row.medical_preview,
            row.status
        );
    }
}
