//! Stratégie 1: la clé brute égale un nom canonique mot pour mot

use crate::index::GeoFeatureIndex;
use crate::key::RegionKey;

use super::MatchStrategy;

/// Correspondance exacte sur le nom canonique complet
pub struct ExactName;

impl MatchStrategy for ExactName {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn resolve(&self, key: &RegionKey, index: &GeoFeatureIndex) -> Vec<usize> {
        index.lookup_exact(key.as_str()).into_iter().collect()
    }
}
