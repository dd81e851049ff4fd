//! Classification en seaux pour l'affichage choroplèthe
//!
//! Les seaux partitionnent les entiers non négatifs sans trou ni
//! chevauchement; chaque bord listé est inclusif côté haut, le seau de
//! tête est ouvert. Le choix du barème est un paramètre explicite de
//! l'appelant.

use serde::Serialize;

use crate::types::Aggregation;

/// Barèmes de seaux nommés, sélectionnés par l'appelant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BucketScheme {
    /// Barème par défaut: bords 0/15/60/100/200/500/1000/3000, tête "3000+"
    Standard,
    /// Variante resserrée: bords 0/50/200/1000, tête "1000+"
    Compact,
}

impl BucketScheme {
    /// Bords supérieurs inclusifs des seaux finis, croissants
    fn upper_edges(self) -> &'static [u64] {
        match self {
            Self::Standard => &[0, 15, 60, 100, 200, 500, 1000, 3000],
            Self::Compact => &[0, 50, 200, 1000],
        }
    }
}

/// Affecte chaque total de feature à un libellé de seau ordonné
pub struct ChoroplethClassifier {
    scheme: BucketScheme,
}

impl ChoroplethClassifier {
    pub fn new(scheme: BucketScheme) -> Self {
        Self { scheme }
    }

    /// Libellés de légende ordonnés pour le maximum donné.
    ///
    /// Quand le total maximal est 0, le barème dégénéré à deux seaux
    /// `["0", "1+"]` s'applique quel que soit le barème sélectionné.
    pub fn legend(&self, max_total: u64) -> Vec<String> {
        if max_total == 0 {
            return vec!["0".to_string(), "1+".to_string()];
        }

        let edges = self.scheme.upper_edges();
        let mut labels = Vec::with_capacity(edges.len() + 1);
        labels.push("0".to_string());
        for pair in edges.windows(2) {
            labels.push(format!("{}-{}", pair[0] + 1, pair[1]));
        }
        labels.push(format!("{}+", edges[edges.len() - 1]));
        labels
    }

    /// Libellé du seau d'un total, sous le maximum donné
    pub fn label_for(&self, total: u64, max_total: u64) -> String {
        if max_total == 0 {
            return if total == 0 { "0" } else { "1+" }.to_string();
        }
        if total == 0 {
            return "0".to_string();
        }

        let edges = self.scheme.upper_edges();
        for pair in edges.windows(2) {
            if total <= pair[1] {
                return format!("{}-{}", pair[0] + 1, pair[1]);
            }
        }
        format!("{}+", edges[edges.len() - 1])
    }

    /// Écrit la catégorie de chaque feature (une seule fois par passe) et
    /// retourne la légende ordonnée pour le rendu
    pub fn classify(&self, aggregation: &mut Aggregation) -> Vec<String> {
        let max_total = aggregation.max_total();
        for feature in &mut aggregation.features {
            feature.category = Some(self.label_for(feature.total, max_total));
        }
        self.legend(max_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GeoFeature, MatchStats};

    fn feature(name: &str, total: u64) -> GeoFeature {
        GeoFeature {
            name: name.to_string(),
            geometry: None,
            total,
            category: None,
        }
    }

    #[test]
    fn test_standard_legend() {
        let classifier = ChoroplethClassifier::new(BucketScheme::Standard);
        assert_eq!(
            classifier.legend(500),
            vec![
                "0", "1-15", "16-60", "61-100", "101-200", "201-500", "501-1000", "1001-3000",
                "3000+"
            ]
        );
    }

    #[test]
    fn test_compact_legend() {
        let classifier = ChoroplethClassifier::new(BucketScheme::Compact);
        assert_eq!(
            classifier.legend(500),
            vec!["0", "1-50", "51-200", "201-1000", "1000+"]
        );
    }

    #[test]
    fn test_zero_max_uses_two_bucket_legend() {
        for scheme in [BucketScheme::Standard, BucketScheme::Compact] {
            let classifier = ChoroplethClassifier::new(scheme);
            assert_eq!(classifier.legend(0), vec!["0", "1+"]);
            assert_eq!(classifier.label_for(0, 0), "0");
        }
    }

    #[test]
    fn test_upper_edges_are_inclusive() {
        let classifier = ChoroplethClassifier::new(BucketScheme::Standard);

        assert_eq!(classifier.label_for(0, 5000), "0");
        assert_eq!(classifier.label_for(15, 5000), "1-15");
        assert_eq!(classifier.label_for(16, 5000), "16-60");
        assert_eq!(classifier.label_for(60, 5000), "16-60");
        assert_eq!(classifier.label_for(100, 5000), "61-100");
        assert_eq!(classifier.label_for(200, 5000), "101-200");
        assert_eq!(classifier.label_for(500, 5000), "201-500");
        assert_eq!(classifier.label_for(1000, 5000), "501-1000");
        assert_eq!(classifier.label_for(3000, 5000), "1001-3000");
        assert_eq!(classifier.label_for(3001, 5000), "3000+");
    }

    #[test]
    fn test_buckets_partition_the_integers() {
        // Chaque entier non négatif tombe dans exactement un libellé de la
        // légende, sans trou ni chevauchement
        for scheme in [BucketScheme::Standard, BucketScheme::Compact] {
            let classifier = ChoroplethClassifier::new(scheme);
            let legend = classifier.legend(10_000);

            let mut previous_position = 0usize;
            for total in 0..=4000u64 {
                let label = classifier.label_for(total, 10_000);
                let position = legend
                    .iter()
                    .position(|l| *l == label)
                    .unwrap_or_else(|| panic!("label '{}' missing from legend", label));
                assert!(
                    position >= previous_position,
                    "bucket order regressed at total={}",
                    total
                );
                previous_position = position;
            }
        }
    }

    #[test]
    fn test_classify_writes_every_category() {
        let mut agg = Aggregation {
            features: vec![
                feature("서울특별시", 0),
                feature("경기도 수원시", 42),
                feature("경기도 부천시", 3200),
            ],
            unmatched: Vec::new(),
            stats: MatchStats::default(),
        };

        let legend = ChoroplethClassifier::new(BucketScheme::Standard).classify(&mut agg);

        assert_eq!(agg.features[0].category.as_deref(), Some("0"));
        assert_eq!(agg.features[1].category.as_deref(), Some("16-60"));
        assert_eq!(agg.features[2].category.as_deref(), Some("3000+"));
        assert_eq!(legend.len(), 9);
    }
}
