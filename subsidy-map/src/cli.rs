//! Définition et implémentation des commandes CLI
//!
//! - `aggregate`: frontières + comptes → GeoJSON enrichi et rapport
//! - `inspect`: diagnostic du jeu de frontières (sans comptes)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::info;

use sigungu::cache::aggregation_fingerprint;
use sigungu::{split_region, BucketScheme, ChoroplethClassifier, CountAggregator, GeoFeatureIndex};

use crate::counts;
use crate::export;
use crate::report::AggregationReport;

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate raw application counts onto canonical boundary features
    Aggregate {
        /// Path to the boundary GeoJSON (FeatureCollection)
        #[arg(short, long)]
        boundaries: PathBuf,

        /// Path to raw counts (JSON object or CSV with region/count columns)
        #[arg(short, long)]
        counts: PathBuf,

        /// Output path for the enriched GeoJSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Bucket scheme for display categories (standard/compact)
        #[arg(long, default_value = "standard")]
        scheme: String,

        /// Reporting-period label recorded in the report (e.g. 2024, 2024-Q1)
        #[arg(long, default_value = "all")]
        period: String,

        /// Write the aggregation report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Inspect a boundary file: feature counts, provinces, ambiguous city tokens
    Inspect {
        /// Path to the boundary GeoJSON (FeatureCollection)
        #[arg(short, long)]
        boundaries: PathBuf,
    },
}

/// Exécute la commande aggregate
pub fn cmd_aggregate(
    boundaries: &Path,
    counts_path: &Path,
    output: Option<&Path>,
    scheme: &str,
    period: &str,
    report_path: Option<&Path>,
) -> Result<()> {
    let scheme = parse_scheme(scheme)?;
    let started_at = Instant::now();

    let index = GeoFeatureIndex::from_path(boundaries)
        .with_context(|| format!("Failed to load boundaries from {}", boundaries.display()))?;
    info!(features = index.len(), "Boundary index ready");

    let raw_counts = counts::load_counts(counts_path)?;
    info!(raw_keys = raw_counts.len(), "Counts loaded");

    let fingerprint = aggregation_fingerprint(&index, &raw_counts);

    let mut aggregation = CountAggregator::new()
        .aggregate(&index, &raw_counts)
        .context("Aggregation failed")?;
    let legend = ChoroplethClassifier::new(scheme).classify(&mut aggregation);

    let mut report = AggregationReport::new(period, &fingerprint);
    report.record_aggregation(&aggregation);
    report.set_duration(started_at.elapsed());
    report.finalize();

    if let Some(output) = output {
        export::write_enriched_geojson(&aggregation, &legend, output)?;
        println!("Wrote {}", output.display());
    }

    report.display();

    if let Some(path) = report_path {
        report.save_to_file(path)?;
        println!("Report saved to {}", path.display());
    }

    Ok(())
}

/// Exécute la commande inspect
pub fn cmd_inspect(boundaries: &Path) -> Result<()> {
    let index = GeoFeatureIndex::from_path(boundaries)
        .with_context(|| format!("Failed to load boundaries from {}", boundaries.display()))?;

    println!("=== Boundary inspection ===");
    println!("Path: {}", boundaries.display());
    println!("Features: {}", index.len());

    let mut by_province: BTreeMap<&str, usize> = BTreeMap::new();
    let mut province_level = 0usize;
    for name in index.all_names() {
        let (province, city) = split_region(name);
        if city.is_none() {
            province_level += 1;
        }
        *by_province.entry(province).or_default() += 1;
    }

    println!("Province-level features: {}", province_level);
    println!("\nPer-province:");
    for (province, count) in &by_province {
        println!("- {}: {} features", province, count);
    }

    // Tokens ville partagés: là où la règle somme-sur-toutes-les-égalités
    // peut dupliquer un compte brut
    let ambiguous = index.ambiguous_city_tokens();
    if ambiguous.is_empty() {
        println!("\nNo ambiguous city tokens");
    } else {
        println!("\nAmbiguous city tokens ({}):", ambiguous.len());
        for (token, indices) in &ambiguous {
            let names: Vec<&str> = indices
                .iter()
                .map(|&i| index.features()[i].name.as_str())
                .collect();
            println!("- {}: {}", token, names.join(", "));
        }
    }

    Ok(())
}

/// Résout le nom de barème donné sur la ligne de commande
fn parse_scheme(scheme: &str) -> Result<BucketScheme> {
    match scheme {
        "standard" => Ok(BucketScheme::Standard),
        "compact" => Ok(BucketScheme::Compact),
        _ => anyhow::bail!("Unknown scheme: {}. Use: standard, compact", scheme),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scheme() {
        assert!(matches!(
            parse_scheme("standard"),
            Ok(BucketScheme::Standard)
        ));
        assert!(matches!(parse_scheme("compact"), Ok(BucketScheme::Compact)));
        assert!(parse_scheme("fancy").is_err());
    }
}
