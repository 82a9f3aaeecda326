//! `lightbnb properties` (search) and `lightbnb property` (get/add)

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lightbnb_db::{NewProperty, PropertyFilter, Store, DEFAULT_LIMIT};

use super::Outcome;

// ============================================================================
// Search
// ============================================================================

#[derive(Parser, Debug, Default)]
pub struct SearchArgs {
    /// City name or part of it (case-insensitive)
    #[arg(long)]
    pub city: Option<String>,

    /// Only properties owned by this user id
    #[arg(long)]
    pub owner_id: Option<i32>,

    /// Minimum cost per night, in cents
    #[arg(long)]
    pub min_price: Option<i32>,

    /// Maximum cost per night, in cents
    #[arg(long)]
    pub max_price: Option<i32>,

    /// Minimum average review rating
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Maximum number of properties to return
    #[arg(long, short = 'n', default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,
}

impl SearchArgs {
    pub fn filter(&self) -> PropertyFilter {
        PropertyFilter {
            city: self.city.clone(),
            owner_id: self.owner_id,
            minimum_price_per_night: self.min_price,
            maximum_price_per_night: self.max_price,
            minimum_rating: self.min_rating,
        }
    }
}

pub async fn search<S: Store + ?Sized>(store: &S, args: SearchArgs) -> Result<Outcome> {
    let properties = store
        .get_all_properties(&args.filter(), args.limit)
        .await
        .context("property search failed")?;
    Outcome::json(&properties)
}

// ============================================================================
// Single property
// ============================================================================

#[derive(Parser, Debug)]
pub struct PropertyArgs {
    #[command(subcommand)]
    pub command: PropertyCommands,
}

#[derive(Subcommand, Debug)]
pub enum PropertyCommands {
    /// Show a property by id
    Get {
        /// Property id
        id: i32,
    },
    /// Create a property from a JSON document
    Add {
        /// JSON file with the property fields ('-' reads stdin)
        #[arg(long)]
        json: PathBuf,
    },
}

pub async fn run<S: Store + ?Sized>(store: &S, args: PropertyArgs) -> Result<Outcome> {
    match args.command {
        PropertyCommands::Get { id } => {
            let property = store
                .get_property_with_id(id)
                .await
                .context("property lookup failed")?;
            Outcome::found_or(property, || format!("no property with id {id}"))
        }
        PropertyCommands::Add { json } => {
            let new_property = read_new_property(&json)?;
            let property = store
                .add_property(&new_property)
                .await
                .context("failed to add property")?;
            tracing::info!(property_id = property.id, "property added");
            Outcome::json(&property)
        }
    }
}

fn read_new_property(path: &Path) -> Result<NewProperty> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read property JSON from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    serde_json::from_str(&content).context("invalid property JSON")
}
