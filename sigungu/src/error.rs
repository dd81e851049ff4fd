//! Types d'erreurs pour le crate sigungu

use thiserror::Error;

/// Erreurs pouvant survenir lors du chargement ou de l'agrégation
#[derive(Debug, Error)]
pub enum SigunguError {
    /// Erreur d'I/O lors de la lecture du fichier de frontières
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Source de frontières illisible ou mal formée
    #[error("Invalid boundary source: {0}")]
    InvalidSource(String),

    /// Le GeoJSON n'est pas une FeatureCollection
    #[error("Boundary source is not a FeatureCollection")]
    NotAFeatureCollection,

    /// Une feature ne porte aucune propriété de nom utilisable
    #[error("Feature {index} has no usable name property (tried: {tried})")]
    MissingName { index: usize, tried: String },

    /// Compte négatif rejeté avant agrégation
    #[error("Negative count for region '{region}': {count}")]
    NegativeCount { region: String, count: i64 },
}

impl SigunguError {
    /// Crée une erreur de source invalide avec contexte
    pub fn invalid_source(reason: impl Into<String>) -> Self {
        Self::InvalidSource(reason.into())
    }
}

impl From<geojson::Error> for SigunguError {
    fn from(err: geojson::Error) -> Self {
        Self::InvalidSource(err.to_string())
    }
}
