//! Rapport d'agrégation avec graceful degradation
//!
//! L'échec de résolution d'une clé brute n'interrompt jamais la passe:
//! il est collecté et affiché. Ce module rassemble les compteurs d'une
//! passe et la liste diagnostique des régions non résolues.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use sigungu::{Aggregation, UnmatchedEntry};

/// Aboutissement global d'une passe d'agrégation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AggregateStatus {
    /// Chaque clé brute a été résolue
    Complete,
    /// Certaines clés résolues, d'autres non
    Partial,
    /// Aucune clé brute résolue
    Empty,
}

/// Rapport complet d'une passe d'agrégation
#[derive(Debug, Clone, Serialize)]
pub struct AggregationReport {
    /// Libellé de la période de rapport couverte
    pub period: String,
    /// Empreinte de contenu (frontières, comptes) en hexadécimal
    pub input_fingerprint: String,
    /// Durée de la passe
    pub duration_secs: f64,
    /// Statut global
    pub status: AggregateStatus,

    // Compteurs globaux
    /// Nombre de features canoniques dans le jeu de frontières
    pub features_total: usize,
    /// Features avec un total non nul
    pub features_with_counts: usize,
    /// Clés brutes distinctes reçues
    pub raw_keys: usize,
    /// Somme des comptes affectés aux features
    pub assigned_total: u64,
    /// Somme des comptes restés non affectés
    pub unmatched_total: u64,

    /// Clés résolues, par stratégie
    pub matched_by_strategy: BTreeMap<String, usize>,

    /// Clés brutes non résolues, avec leur compte d'origine
    pub unmatched: Vec<UnmatchedEntry>,
}

impl AggregationReport {
    /// Crée un rapport pour une période et une empreinte d'entrée
    pub fn new(period: &str, fingerprint: &[u8; 32]) -> Self {
        Self {
            period: period.to_string(),
            input_fingerprint: hex::encode(fingerprint),
            duration_secs: 0.0,
            status: AggregateStatus::Complete,
            features_total: 0,
            features_with_counts: 0,
            raw_keys: 0,
            assigned_total: 0,
            unmatched_total: 0,
            matched_by_strategy: BTreeMap::new(),
            unmatched: Vec::new(),
        }
    }

    /// Replie une agrégation terminée dans le rapport
    pub fn record_aggregation(&mut self, aggregation: &Aggregation) {
        self.features_total = aggregation.features.len();
        self.features_with_counts = aggregation.features.iter().filter(|f| f.total > 0).count();
        self.raw_keys = aggregation.stats.matched() + aggregation.stats.unmatched;
        self.assigned_total = aggregation.assigned_total();
        self.unmatched_total = aggregation.unmatched.iter().map(|u| u.count).sum();
        self.matched_by_strategy = aggregation.stats.by_strategy.clone();
        self.unmatched = aggregation.unmatched.clone();
    }

    /// Définit la durée de la passe
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Détermine le statut final à partir des compteurs enregistrés
    pub fn finalize(&mut self) {
        let matched: usize = self.matched_by_strategy.values().sum();

        self.status = if self.unmatched.is_empty() {
            AggregateStatus::Complete
        } else if matched > 0 {
            AggregateStatus::Partial
        } else {
            AggregateStatus::Empty
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("AGGREGATION REPORT - Period {}", self.period);
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.2}s", self.duration_secs);
        println!("Input fingerprint: {}", &self.input_fingerprint[..16]);

        println!("\n--- SUMMARY ---");
        println!(
            "Features: {} total, {} with counts",
            self.features_total, self.features_with_counts
        );
        println!(
            "Raw keys: {} received, {} matched, {} unmatched",
            self.raw_keys,
            self.raw_keys - self.unmatched.len(),
            self.unmatched.len()
        );
        println!(
            "Applications: {} assigned, {} unassigned",
            self.assigned_total, self.unmatched_total
        );

        if !self.matched_by_strategy.is_empty() {
            println!("\n--- BY STRATEGY ---");
            for (strategy, count) in &self.matched_by_strategy {
                println!("  {}: {} keys", strategy, count);
            }
        }

        println!("\n{} regions unmatched", self.unmatched.len());
        if !self.unmatched.is_empty() {
            for entry in self.unmatched.iter().take(20) {
                println!("  {}: {}", entry.region, entry.count);
            }
            if self.unmatched.len() > 20 {
                println!("  ... and {} more", self.unmatched.len() - 20);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{}: {} assigned over {} features, {} regions unmatched",
            self.period,
            self.assigned_total,
            self.features_with_counts,
            self.unmatched.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigungu::{GeoFeature, MatchStats};

    fn report() -> AggregationReport {
        AggregationReport::new("2024-Q1", &[0u8; 32])
    }

    fn aggregation(unmatched: Vec<UnmatchedEntry>, matched: &[(&str, usize)]) -> Aggregation {
        let mut stats = MatchStats::default();
        for (strategy, count) in matched {
            for _ in 0..*count {
                stats.record(strategy);
            }
        }
        stats.unmatched = unmatched.len();

        Aggregation {
            features: vec![
                GeoFeature {
                    name: "서울특별시".to_string(),
                    geometry: None,
                    total: 42,
                    category: None,
                },
                GeoFeature {
                    name: "경기도 수원시".to_string(),
                    geometry: None,
                    total: 0,
                    category: None,
                },
            ],
            unmatched,
            stats,
        }
    }

    #[test]
    fn test_new_report_defaults() {
        let report = report();
        assert_eq!(report.status, AggregateStatus::Complete);
        assert_eq!(report.features_total, 0);
        assert_eq!(report.input_fingerprint.len(), 64);
    }

    #[test]
    fn test_record_aggregation_counters() {
        let mut report = report();
        report.record_aggregation(&aggregation(
            vec![UnmatchedEntry {
                region: "없는곳".to_string(),
                count: 5,
            }],
            &[("exact", 1)],
        ));

        assert_eq!(report.features_total, 2);
        assert_eq!(report.features_with_counts, 1);
        assert_eq!(report.raw_keys, 2);
        assert_eq!(report.assigned_total, 42);
        assert_eq!(report.unmatched_total, 5);
        assert_eq!(report.matched_by_strategy.get("exact"), Some(&1));
    }

    #[test]
    fn test_finalize_complete() {
        let mut report = report();
        report.record_aggregation(&aggregation(Vec::new(), &[("exact", 2)]));
        report.finalize();
        assert_eq!(report.status, AggregateStatus::Complete);
    }

    #[test]
    fn test_finalize_partial() {
        let mut report = report();
        report.record_aggregation(&aggregation(
            vec![UnmatchedEntry {
                region: "없는곳".to_string(),
                count: 5,
            }],
            &[("suffix", 1)],
        ));
        report.finalize();
        assert_eq!(report.status, AggregateStatus::Partial);
    }

    #[test]
    fn test_finalize_empty() {
        let mut report = report();
        report.record_aggregation(&aggregation(
            vec![UnmatchedEntry {
                region: "없는곳".to_string(),
                count: 5,
            }],
            &[],
        ));
        report.finalize();
        assert_eq!(report.status, AggregateStatus::Empty);
    }

    #[test]
    fn test_summary() {
        let mut report = report();
        report.record_aggregation(&aggregation(Vec::new(), &[("exact", 1)]));
        let summary = report.summary();
        assert!(summary.contains("2024-Q1"));
        assert!(summary.contains("42 assigned"));
        assert!(summary.contains("0 regions unmatched"));
    }

    #[test]
    fn test_save_to_file() {
        let mut report = report();
        report.record_aggregation(&aggregation(Vec::new(), &[("exact", 1)]));

        let path = std::env::temp_dir().join("test_subsidy_map_report.json");
        report.save_to_file(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"period\": \"2024-Q1\""));
        assert!(content.contains("\"assigned_total\": 42"));

        std::fs::remove_file(path).ok();
    }
}
