//! Stratégie 2: la clé brute égale le token ville/arrondissement
//!
//! Un nom canonique correspond s'il se termine par `" " + clé`. Toutes les
//! égalités sont retournées: l'agrégateur ajoute le compte brut à CHAQUE
//! feature à égalité, sans le répartir.

use crate::index::GeoFeatureIndex;
use crate::key::RegionKey;

use super::MatchStrategy;

/// Correspondance sur le token ville/arrondissement du nom canonique
pub struct CitySuffix;

impl MatchStrategy for CitySuffix {
    fn name(&self) -> &'static str {
        "suffix"
    }

    fn resolve(&self, key: &RegionKey, index: &GeoFeatureIndex) -> Vec<usize> {
        index.lookup_by_city_suffix(key.as_str()).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_returns_every_tie() {
        let index = GeoFeatureIndex::from_geojson_str(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "properties": {"name": "경기도 수원시"}, "geometry": null},
                    {"type": "Feature", "properties": {"name": "강원도 수원시"}, "geometry": null},
                    {"type": "Feature", "properties": {"name": "경기도 부천시"}, "geometry": null}
                ]
            }"#,
        )
        .unwrap();
        let strategy = CitySuffix;

        assert_eq!(strategy.resolve(&RegionKey::new("수원시"), &index), vec![0, 1]);
        assert_eq!(strategy.resolve(&RegionKey::new("부천시"), &index), vec![2]);
        assert!(strategy
            .resolve(&RegionKey::new("경기도 수원시"), &index)
            .is_empty());
    }
}
