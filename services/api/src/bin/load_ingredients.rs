//! Bulk-load the ingredient catalogue from a JSON file.
//!
//! ```bash
//! DATABASE_URL=postgres://... load-ingredients data/ingredients.json
//! ```
//!
//! The file holds `[{"name": "...", "measurement_unit": "..."}]`. Rows that
//! already exist (same name and unit) are skipped.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sea_orm::Database;
use tracing::info;

use foodgram_api::config::ApiConfig;
use foodgram_api::domain::types::NewIngredient;
use foodgram_api::infra::db::DbIngredientRepository;
use foodgram_api::usecase::ingredient::LoadIngredientsUseCase;
use foodgram_core::config::Config;
use foodgram_core::tracing::init_tracing;

#[derive(Parser)]
#[command(about = "Import ingredients from a JSON file")]
struct Args {
    /// Path to a JSON array of `{name, measurement_unit}` objects
    file: PathBuf,

    /// Database URL; falls back to the DATABASE_URL environment variable
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let database_url = match args.database_url {
        Some(url) => url,
        None => {
            ApiConfig::try_from_env()
                .context("DATABASE_URL is not set")?
                .database_url
        }
    };

    let raw = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let items: Vec<NewIngredient> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;
    let total = items.len();

    let db = Database::connect(&database_url)
        .await
        .context("failed to connect to database")?;
    let usecase = LoadIngredientsUseCase {
        repo: DbIngredientRepository { db },
    };
    let report = usecase.execute(items).await?;

    info!(
        total,
        inserted = report.inserted,
        skipped_invalid = report.skipped_invalid,
        "ingredients loaded"
    );
    println!(
        "Loaded {} of {total} ingredient(s); {} invalid row(s) skipped",
        report.inserted, report.skipped_invalid
    );
    Ok(())
}
