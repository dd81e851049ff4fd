//! Agrégation des comptes bruts en totaux par feature
//!
//! Chaque clé brute est soit affectée via la chaîne de stratégies, soit
//! rapportée comme non résolue avec son compte d'origine. Aucune clé ne
//! disparaît en silence, et chaque feature canonique apparaît dans la
//! sortie même sans aucun compte.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::SigunguError;
use crate::index::GeoFeatureIndex;
use crate::matcher::RegionMatcher;
use crate::types::{Aggregation, GeoFeature, MatchStats, UnmatchedEntry};

/// Replie une table clé-brute → compte en totaux par feature canonique
pub struct CountAggregator {
    matcher: RegionMatcher,
}

impl CountAggregator {
    /// Agrégateur avec la chaîne de stratégies par défaut
    pub fn new() -> Self {
        Self {
            matcher: RegionMatcher::new(),
        }
    }

    /// Agrégateur avec une chaîne de stratégies fournie
    pub fn with_matcher(matcher: RegionMatcher) -> Self {
        Self { matcher }
    }

    /// Exécute une passe d'agrégation.
    ///
    /// Pure et déterministe: le même couple (index, comptes) produit une
    /// sortie identique bit à bit, ce qui permet la mémoïsation par
    /// empreinte de contenu côté appelant.
    ///
    /// # Errors
    ///
    /// `NegativeCount` si un compte est négatif; le rejet intervient avant
    /// toute agrégation, aucune sortie partielle n'est produite.
    pub fn aggregate(
        &self,
        index: &GeoFeatureIndex,
        counts: &BTreeMap<String, i64>,
    ) -> Result<Aggregation, SigunguError> {
        // Valider l'entrée entière avant de commencer
        for (region, &count) in counts {
            if count < 0 {
                return Err(SigunguError::NegativeCount {
                    region: region.clone(),
                    count,
                });
            }
        }

        // Pré-amorcer chaque feature à zéro: pas d'entrée manquante en sortie
        let mut totals = vec![0u64; index.len()];
        let mut unmatched = Vec::new();
        let mut stats = MatchStats::default();

        for (region, &count) in counts {
            let count = count as u64;
            let result = self.matcher.resolve(region, index);

            if let Some(strategy) = result.strategy {
                stats.record(strategy);
                // Règle somme-sur-toutes-les-égalités: le compte entier va
                // à CHAQUE feature résolue, il n'est pas réparti
                for &idx in &result.features {
                    totals[idx] += count;
                }
                debug!(
                    region = region.as_str(),
                    strategy = strategy,
                    features = result.features.len(),
                    "Resolved raw key"
                );
            } else {
                stats.unmatched += 1;
                unmatched.push(UnmatchedEntry {
                    region: region.clone(),
                    count,
                });
            }
        }

        let features = index
            .features()
            .iter()
            .zip(totals)
            .map(|(feature, total)| GeoFeature {
                name: feature.name.clone(),
                geometry: feature.geometry.clone(),
                total,
                category: None,
            })
            .collect();

        Ok(Aggregation {
            features,
            unmatched,
            stats,
        })
    }
}

impl Default for CountAggregator {
    fn default() -> Self {
        Self::new()
    }
}
