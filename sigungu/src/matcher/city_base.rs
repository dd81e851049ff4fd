//! Stratégie 3: repli regex sur le token base-ville
//!
//! Les sources amont expriment la même unité administrative à des
//! granularités variables ("시군구" au niveau arrondissement contre un nom
//! en "시" plus grossier, avec ou sans préfixe de province). Le repli
//! extrait le plus court préfixe du corps se terminant par le marqueur de
//! ville "시", puis tente dans l'ordre: (a) le token base-ville seul dans
//! l'index des suffixes, (b) "⟨province⟩ ⟨base-ville⟩" en recherche exacte.
//! Premier résultat gagnant.

use regex::Regex;

use crate::index::GeoFeatureIndex;
use crate::key::RegionKey;

use super::MatchStrategy;

/// Plus court préfixe se terminant par le marqueur de ville "시"
/// (capture non gourmande, la plus à gauche)
const CITY_BASE_PATTERN: &str = "^(.+?시)";

/// Repli par extraction regex du token base-ville
pub struct CityBase {
    pattern: Regex,
}

impl CityBase {
    pub fn new() -> Self {
        Self {
            // Motif littéral: la compilation ne peut pas échouer
            pattern: Regex::new(CITY_BASE_PATTERN).expect("hard-coded pattern"),
        }
    }
}

impl Default for CityBase {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchStrategy for CityBase {
    fn name(&self) -> &'static str {
        "city_base"
    }

    fn resolve(&self, key: &RegionKey, index: &GeoFeatureIndex) -> Vec<usize> {
        let raw = key.as_str();

        // Retirer le token de province en tête (texte avant le premier
        // espace, s'il y en a un) pour obtenir le corps
        let (province, body) = match raw.split_once(' ') {
            Some((province, body)) => (Some(province), body),
            None => (None, raw),
        };

        let Some(caps) = self.pattern.captures(body) else {
            return Vec::new();
        };
        let city_base = &caps[1];

        // (a) token base-ville seul contre l'index des suffixes
        let hits = index.lookup_by_city_suffix(city_base);
        if !hits.is_empty() {
            return hits.to_vec();
        }

        // (b) recombiné avec le token de province d'origine
        if let Some(province) = province {
            let full = format!("{} {}", province, city_base);
            if let Some(idx) = index.lookup_exact(&full) {
                return vec![idx];
            }
        }

        Vec::new()
    }
}
