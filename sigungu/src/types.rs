//! Types de données pour le crate sigungu

use std::collections::BTreeMap;

use geojson::Geometry;
use serde::Serialize;

/// Une feature canonique enrichie par une passe d'agrégation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoFeature {
    /// Nom canonique ("⟨province⟩ ⟨ville/arrondissement⟩", ou nom de
    /// province seul pour les features de niveau province)
    pub name: String,

    /// Géométrie opaque, transmise telle quelle à la couche de rendu
    pub geometry: Option<Geometry>,

    /// Somme des comptes bruts affectés à cette feature
    pub total: u64,

    /// Libellé de catégorie d'affichage, rempli par le classificateur
    pub category: Option<String>,
}

/// Une clé brute qu'aucune stratégie n'a pu résoudre
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedEntry {
    /// La chaîne de région brute telle que reçue
    pub region: String,

    /// Son compte d'origine
    pub count: u64,
}

/// Statistiques de résolution par stratégie
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    /// Clés brutes résolues, par nom de stratégie
    pub by_strategy: BTreeMap<String, usize>,

    /// Clés brutes qu'aucune stratégie n'a résolues
    pub unmatched: usize,
}

impl MatchStats {
    /// Enregistre une clé résolue par la stratégie donnée
    pub fn record(&mut self, strategy: &str) {
        *self.by_strategy.entry(strategy.to_string()).or_default() += 1;
    }

    /// Nombre total de clés résolues
    pub fn matched(&self) -> usize {
        self.by_strategy.values().sum()
    }
}

/// Résultat d'une passe d'agrégation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    /// Chaque feature canonique, dans l'ordre du document source,
    /// avec son total (0 par défaut, jamais d'entrée manquante)
    pub features: Vec<GeoFeature>,

    /// Clés brutes non résolues, dans l'ordre d'entrée
    pub unmatched: Vec<UnmatchedEntry>,

    /// Comment les clés brutes ont été résolues
    pub stats: MatchStats,
}

impl Aggregation {
    /// Somme des comptes affectés aux features
    pub fn assigned_total(&self) -> u64 {
        self.features.iter().map(|f| f.total).sum()
    }

    /// Total maximal parmi les features (0 si aucune feature)
    pub fn max_total(&self) -> u64 {
        self.features.iter().map(|f| f.total).max().unwrap_or(0)
    }
}
