use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use sizeclass::{
    generate, validate, BatchBound, ClassTableConfig, ConfigKey, SizeClassDescriptor, Table,
    TableListing,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Size-class table tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a table in the published column layout
    Table {
        /// Configuration key, e.g. 8k-align16
        key: String,

        /// Generate the table instead of loading the certified literal
        #[arg(long, default_value_t = false)]
        generate: bool,
    },
    /// Print a JSON validation report
    Report {
        /// Configuration key, e.g. 8k-align16
        key: String,

        /// Generate the table instead of loading the certified literal
        #[arg(long, default_value_t = false)]
        generate: bool,

        /// Hold batches to the objects one span holds
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Validate a table stored as JSON against a configuration
    Certify {
        /// Configuration key, e.g. 8k-align16
        key: String,

        /// JSON array of descriptors
        path: PathBuf,

        /// Hold batches to the objects one span holds
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Write a table as JSON
    Export {
        /// Configuration key, e.g. 8k-align16
        key: String,

        /// Output file (stdout if omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Generate the table instead of loading the certified literal
        #[arg(long, default_value_t = false)]
        generate: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Table { key, generate } => {
            let key = parse_key(&key)?;
            let config = config_for(key, generate);
            let table = load(key, &config, generate)?;
            let report = validate(table.classes(), &config);
            print!("{}", TableListing::new(table.classes(), &report));
            summarize(&report);
        }
        Commands::Report { key, generate, strict } => {
            let key = parse_key(&key)?;
            let config = config_for(key, generate || strict);
            let table = load(key, &config, generate)?;
            let report = validate(table.classes(), &config);
            println!("{}", report.to_json().context("Failed to serialize report")?);
        }
        Commands::Certify { key, path, strict } => {
            let key = parse_key(&key)?;
            let config = config_for(key, strict);
            let classes = read_table(&path)?;
            let report = validate(&classes, &config);
            print!("{}", TableListing::new(&classes, &report));
            summarize(&report);
            if !report.passed() {
                bail!(
                    "{} failed certification for {}: {} violation(s)",
                    path.display(),
                    key,
                    report.violations.len()
                );
            }
        }
        Commands::Export { key, out, generate } => {
            let key = parse_key(&key)?;
            let config = config_for(key, generate);
            let table = load(key, &config, generate)?;
            let json = serde_json::to_string_pretty(&table).context("Failed to serialize table")?;
            match out {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Wrote {} classes to {}", table.len(), path.display());
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}

fn parse_key(key: &str) -> Result<ConfigKey> {
    key.parse()
        .with_context(|| format!("Unknown configuration {key:?} (expected e.g. 8k-align8)"))
}

fn config_for(key: ConfigKey, strict: bool) -> ClassTableConfig {
    let config = ClassTableConfig::builtin(key);
    if strict {
        config.with_batch_bound(BatchBound::ObjectsPerSpan)
    } else {
        config
    }
}

fn load(key: ConfigKey, config: &ClassTableConfig, generated: bool) -> Result<Table> {
    if generated {
        generate(config).with_context(|| format!("Failed to generate table for {key}"))
    } else {
        Ok(Table::from(sizeclass::config_set::literal::certified(key)))
    }
}

fn read_table(path: &Path) -> Result<Vec<SizeClassDescriptor>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn summarize(report: &sizeclass::ValidationReport) {
    println!(
        "// {} classes, max waste {:.2}%, max growth {:.2}%",
        report.class_count,
        report.max_waste_pct(),
        report.max_growth_pct()
    );
    for violation in &report.violations {
        eprintln!("violation: {violation}");
    }
}
