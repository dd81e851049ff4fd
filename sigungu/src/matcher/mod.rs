//! Résolution des clés brutes vers les features canoniques
//!
//! Les stratégies partagent une interface unique et sont essayées en ordre
//! de priorité strict; la première qui produit un résultat court-circuite
//! les suivantes. L'absence de résultat est un aboutissement normal et
//! rapportable, jamais une erreur.

mod city_base;
mod exact;
mod suffix;

pub use city_base::CityBase;
pub use exact::ExactName;
pub use suffix::CitySuffix;

use crate::index::GeoFeatureIndex;
use crate::key::RegionKey;

/// Une stratégie de résolution; retourne des indices dans l'index de
/// frontières (vide = pas de résultat, la stratégie suivante est essayée)
pub trait MatchStrategy {
    /// Nom stable de la stratégie, utilisé dans les statistiques
    fn name(&self) -> &'static str;

    fn resolve(&self, key: &RegionKey, index: &GeoFeatureIndex) -> Vec<usize>;
}

/// Aboutissement de la résolution d'une clé brute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Nom de la stratégie qui a résolu la clé, le cas échéant
    pub strategy: Option<&'static str>,

    /// Indices de toutes les features canoniques résolues
    pub features: Vec<usize>,
}

impl MatchResult {
    pub fn unmatched() -> Self {
        Self {
            strategy: None,
            features: Vec::new(),
        }
    }

    pub fn is_match(&self) -> bool {
        !self.features.is_empty()
    }
}

/// Chaîne de stratégies ordonnée
pub struct RegionMatcher {
    strategies: Vec<Box<dyn MatchStrategy>>,
}

impl RegionMatcher {
    /// Chaîne par défaut: exact, puis suffixe ville, puis repli regex
    pub fn new() -> Self {
        Self::with_strategies(vec![
            Box::new(ExactName),
            Box::new(CitySuffix),
            Box::new(CityBase::new()),
        ])
    }

    /// Chaîne personnalisée (l'ordre donné est l'ordre de priorité)
    pub fn with_strategies(strategies: Vec<Box<dyn MatchStrategy>>) -> Self {
        Self { strategies }
    }

    /// Résout une chaîne de région brute. Ne lève jamais d'erreur.
    pub fn resolve(&self, raw: &str, index: &GeoFeatureIndex) -> MatchResult {
        let key = RegionKey::new(raw);
        for strategy in &self.strategies {
            let features = strategy.resolve(&key, index);
            if !features.is_empty() {
                return MatchResult {
                    strategy: Some(strategy.name()),
                    features,
                };
            }
        }
        MatchResult::unmatched()
    }
}

impl Default for RegionMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::GeoFeatureIndex;

    fn fixture_index() -> GeoFeatureIndex {
        GeoFeatureIndex::from_geojson_str(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "properties": {"name": "서울특별시"}, "geometry": null},
                    {"type": "Feature", "properties": {"name": "경기도 수원시"}, "geometry": null},
                    {"type": "Feature", "properties": {"name": "경기도 부천시"}, "geometry": null}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_priority_exact_before_suffix() {
        // "서울특별시" est aussi sondé par les stratégies suivantes, mais
        // la stratégie exacte doit gagner
        let index = fixture_index();
        let matcher = RegionMatcher::new();

        let result = matcher.resolve("서울특별시", &index);
        assert_eq!(result.strategy, Some("exact"));
        assert_eq!(result.features, vec![0]);
    }

    #[test]
    fn test_suffix_when_no_exact() {
        let index = fixture_index();
        let matcher = RegionMatcher::new();

        let result = matcher.resolve("수원시", &index);
        assert_eq!(result.strategy, Some("suffix"));
        assert_eq!(result.features, vec![1]);
    }

    #[test]
    fn test_city_base_fallback() {
        let index = fixture_index();
        let matcher = RegionMatcher::new();

        let result = matcher.resolve("경기도 부천시소사구", &index);
        assert_eq!(result.strategy, Some("city_base"));
        assert_eq!(result.features, vec![2]);
    }

    #[test]
    fn test_unmatched_is_not_an_error() {
        let index = fixture_index();
        let matcher = RegionMatcher::new();

        let result = matcher.resolve("존재하지않는지역", &index);
        assert!(!result.is_match());
        assert_eq!(result.strategy, None);
    }

    #[test]
    fn test_raw_key_normalized_before_matching() {
        let index = fixture_index();
        let matcher = RegionMatcher::new();

        let result = matcher.resolve("  경기도   수원시 ", &index);
        assert_eq!(result.strategy, Some("exact"));
        assert_eq!(result.features, vec![1]);
    }

    #[test]
    fn test_custom_chain_order_is_respected() {
        let index = fixture_index();
        // Chaîne réduite: sans le repli regex, la clé reste non résolue
        let matcher =
            RegionMatcher::with_strategies(vec![Box::new(ExactName), Box::new(CitySuffix)]);

        let result = matcher.resolve("경기도 부천시소사구", &index);
        assert!(!result.is_match());
    }
}
