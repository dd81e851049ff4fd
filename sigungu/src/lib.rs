//! # sigungu
//!
//! Réconciliation de noms de régions administratives coréennes en forme
//! libre contre un jeu de frontières canonique, avec agrégation par
//! feature et classification choroplèthe.
//!
//! ## Features
//!
//! - Chaîne de stratégies ordonnée (exact, suffixe ville, repli regex
//!   base-ville) derrière une interface unique
//! - Agrégation qui ne perd jamais une clé brute: les clés non résolues
//!   reviennent dans un rapport dédié avec leur compte d'origine
//! - Deux barèmes de seaux sélectionnables pour les catégories d'affichage
//! - Mémoïsation adressée par contenu des chargements et des agrégations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::collections::BTreeMap;
//! use sigungu::{BucketScheme, ChoroplethClassifier, GeoFeatureIndex};
//!
//! let index = GeoFeatureIndex::from_path(Path::new("boundaries.geojson"))?;
//! let mut aggregation = sigungu::aggregate(&index, &counts)?;
//! let legend = ChoroplethClassifier::new(BucketScheme::Standard)
//!     .classify(&mut aggregation);
//!
//! for entry in &aggregation.unmatched {
//!     println!("{}: {} (unmatched)", entry.region, entry.count);
//! }
//! ```

pub mod aggregate;
pub mod cache;
pub mod classify;
pub mod error;
pub mod index;
pub mod key;
pub mod matcher;
pub mod types;

pub use aggregate::CountAggregator;
pub use classify::{BucketScheme, ChoroplethClassifier};
pub use error::SigunguError;
pub use index::{CanonicalFeature, GeoFeatureIndex};
pub use key::RegionKey;
pub use matcher::{MatchResult, MatchStrategy, RegionMatcher};
pub use types::{Aggregation, GeoFeature, MatchStats, UnmatchedEntry};

use std::collections::BTreeMap;

/// Découpe un nom canonique en (province, ville/arrondissement).
///
/// La partie ville est le texte après le PREMIER espace; un nom sans
/// espace est une feature de niveau province.
pub fn split_region(name: &str) -> (&str, Option<&str>) {
    match name.split_once(' ') {
        Some((province, city)) => (province, Some(city)),
        None => (name, None),
    }
}

/// Agrégation en un appel avec la chaîne de stratégies par défaut.
///
/// # Errors
///
/// `NegativeCount` si un compte d'entrée est négatif.
pub fn aggregate(
    index: &GeoFeatureIndex,
    counts: &BTreeMap<String, i64>,
) -> Result<Aggregation, SigunguError> {
    CountAggregator::new().aggregate(index, counts)
}
