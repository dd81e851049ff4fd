//! Export GeoJSON enrichi pour la couche cartographique
//!
//! Chaque feature ressort avec ses propriétés `name`/`total`/`category`
//! et sa géométrie d'origine intacte; la légende ordonnée voyage en
//! membre étranger de la FeatureCollection.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, JsonObject};
use serde_json::Value;

use sigungu::Aggregation;

/// Écrit l'agrégation classifiée en FeatureCollection enrichie
pub fn write_enriched_geojson(
    aggregation: &Aggregation,
    legend: &[String],
    output_path: &Path,
) -> Result<()> {
    let collection = to_feature_collection(aggregation, legend);

    let file = File::create(output_path)
        .with_context(|| format!("Failed to create file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &collection).context("Failed to serialize enriched GeoJSON")?;
    writer.flush()?;

    Ok(())
}

/// Construit la FeatureCollection enrichie
pub fn to_feature_collection(aggregation: &Aggregation, legend: &[String]) -> FeatureCollection {
    let features = aggregation
        .features
        .iter()
        .map(|feature| {
            let mut properties = JsonObject::new();
            properties.insert("name".to_string(), Value::String(feature.name.clone()));
            properties.insert("total".to_string(), Value::from(feature.total));
            properties.insert(
                "category".to_string(),
                feature
                    .category
                    .clone()
                    .map(Value::String)
                    .unwrap_or(Value::Null),
            );

            Feature {
                bbox: None,
                geometry: feature.geometry.clone(),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    let mut foreign_members = JsonObject::new();
    foreign_members.insert(
        "legend".to_string(),
        Value::Array(legend.iter().cloned().map(Value::String).collect()),
    );

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(foreign_members),
    }
}
