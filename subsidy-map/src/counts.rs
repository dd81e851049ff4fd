//! Ingestion des comptes bruts (objet JSON ou CSV)
//!
//! Le format est choisi par extension. Les lignes CSV répétées pour une
//! même région sont sommées, comme le regroupement amont qui produit ces
//! fichiers. Les comptes non numériques sont rejetés ici; les comptes
//! négatifs passent au moteur, qui les rejette avant agrégation.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{anyhow, Context, Result};

/// Charge une table région → compte depuis un fichier JSON ou CSV
pub fn load_counts(path: &Path) -> Result<BTreeMap<String, i64>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if extension != "json" && extension != "csv" {
        return Err(anyhow!(
            "Unsupported counts format: {} (use .json or .csv)",
            path.display()
        ));
    }

    let file =
        File::open(path).with_context(|| format!("Failed to open counts file: {}", path.display()))?;

    if extension == "json" {
        parse_json(BufReader::new(file))
    } else {
        parse_csv(BufReader::new(file))
    }
}

/// Parse un objet JSON région → compte entier
pub fn parse_json<R: Read>(reader: R) -> Result<BTreeMap<String, i64>> {
    let value: serde_json::Value =
        serde_json::from_reader(reader).context("Failed to parse counts JSON")?;

    let object = value
        .as_object()
        .ok_or_else(|| anyhow!("Counts JSON must be an object of region -> count"))?;

    let mut counts = BTreeMap::new();
    for (region, value) in object {
        let count = value
            .as_i64()
            .ok_or_else(|| anyhow!("Count for '{}' is not an integer: {}", region, value))?;
        counts.insert(region.clone(), count);
    }

    Ok(counts)
}

/// Parse un CSV avec colonnes `region` et `count` (repli positionnel 0/1)
pub fn parse_csv<R: Read>(reader: R) -> Result<BTreeMap<String, i64>> {
    let mut rdr = csv::ReaderBuilder::new().from_reader(reader);
    let headers = rdr.headers().context("Failed to read CSV headers")?.clone();

    let region_idx = headers.iter().position(|h| h == "region").unwrap_or(0);
    let count_idx = headers.iter().position(|h| h == "count").unwrap_or(1);

    let mut counts = BTreeMap::new();
    for result in rdr.records() {
        let record = result.context("Failed to read CSV record")?;

        let region = record.get(region_idx).unwrap_or("").trim();
        if region.is_empty() {
            continue;
        }

        let raw = record.get(count_idx).unwrap_or("").trim();
        let count: i64 = raw
            .parse()
            .with_context(|| format!("Invalid count '{}' for region '{}'", raw, region))?;

        // Lignes répétées = regroupement amont, on somme
        *counts.entry(region.to_string()).or_insert(0) += count;
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_object() {
        let counts = parse_json(r#"{"서울특별시": 42, "수원시": 10}"#.as_bytes()).unwrap();
        assert_eq!(counts.get("서울특별시"), Some(&42));
        assert_eq!(counts.get("수원시"), Some(&10));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_parse_json_rejects_non_integer() {
        assert!(parse_json(r#"{"서울특별시": "beaucoup"}"#.as_bytes()).is_err());
        assert!(parse_json(r#"{"서울특별시": 1.5}"#.as_bytes()).is_err());
        assert!(parse_json(r#"[1, 2, 3]"#.as_bytes()).is_err());
    }

    #[test]
    fn test_parse_json_keeps_negative_for_engine_rejection() {
        let counts = parse_json(r#"{"서울특별시": -3}"#.as_bytes()).unwrap();
        assert_eq!(counts.get("서울특별시"), Some(&-3));
    }

    #[test]
    fn test_parse_csv_named_columns() {
        let data = "region,count\n서울특별시,42\n수원시,10\n";
        let counts = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(counts.get("서울특별시"), Some(&42));
        assert_eq!(counts.get("수원시"), Some(&10));
    }

    #[test]
    fn test_parse_csv_sums_repeated_regions() {
        let data = "region,count\n수원시,10\n수원시,5\n";
        let counts = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(counts.get("수원시"), Some(&15));
    }

    #[test]
    fn test_parse_csv_positional_fallback() {
        let data = "지역,건수\n서울특별시,42\n";
        let counts = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(counts.get("서울특별시"), Some(&42));
    }

    #[test]
    fn test_parse_csv_skips_blank_region() {
        let data = "region,count\n,42\n수원시,10\n";
        let counts = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_parse_csv_rejects_non_numeric() {
        let data = "region,count\n서울특별시,beaucoup\n";
        assert!(parse_csv(data.as_bytes()).is_err());
    }
}
