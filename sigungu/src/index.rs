//! Index des features canoniques avec structures de recherche
//!
//! Chargé une fois par source de frontières, puis partagé entre toutes les
//! passes d'agrégation. Le chargement est idempotent et l'index porte une
//! empreinte de contenu pour la mémoïsation par identité de source.

use std::collections::HashMap;
use std::path::Path;

use geojson::{FeatureCollection, GeoJson, Geometry};
use tracing::warn;

use crate::error::SigunguError;
use crate::key::RegionKey;
use crate::split_region;

/// Propriétés sondées, dans l'ordre, pour le nom d'affichage canonique
const NAME_PROPERTIES: [&str; 4] = ["name", "SIG_KOR_NM", "CTP_KOR_NM", "adm_nm"];

/// Un enregistrement de frontière nommé, issu de la source canonique
#[derive(Debug, Clone)]
pub struct CanonicalFeature {
    /// Nom canonique normalisé
    pub name: String,

    /// Géométrie opaque (jamais inspectée, jamais modifiée)
    pub geometry: Option<Geometry>,
}

/// Ensemble de features canoniques avec recherche exacte O(1) et index
/// auxiliaire par token ville/arrondissement (la partie après le premier
/// espace du nom canonique)
#[derive(Debug, Clone)]
pub struct GeoFeatureIndex {
    features: Vec<CanonicalFeature>,
    by_name: HashMap<String, usize>,
    by_city: HashMap<String, Vec<usize>>,
    fingerprint: [u8; 32],
}

impl GeoFeatureIndex {
    /// Charge la collection canonique depuis un fichier GeoJSON
    pub fn from_path(path: &Path) -> Result<Self, SigunguError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_geojson_str(&source)
    }

    /// Charge la collection canonique depuis une chaîne GeoJSON
    pub fn from_geojson_str(source: &str) -> Result<Self, SigunguError> {
        let geojson: GeoJson = source.parse()?;
        let collection = match geojson {
            GeoJson::FeatureCollection(fc) => fc,
            _ => return Err(SigunguError::NotAFeatureCollection),
        };

        let fingerprint = *blake3::hash(source.as_bytes()).as_bytes();
        Self::build(collection, fingerprint)
    }

    /// Construit l'index depuis une FeatureCollection déjà parsée.
    ///
    /// L'empreinte est calculée sur la collection re-sérialisée pour que la
    /// mémoïsation par contenu reste valable quel que soit le chemin
    /// d'entrée.
    pub fn from_collection(collection: FeatureCollection) -> Result<Self, SigunguError> {
        let serialized = serde_json::to_vec(&collection)
            .map_err(|e| SigunguError::invalid_source(e.to_string()))?;
        let fingerprint = *blake3::hash(&serialized).as_bytes();
        Self::build(collection, fingerprint)
    }

    fn build(collection: FeatureCollection, fingerprint: [u8; 32]) -> Result<Self, SigunguError> {
        if collection.features.is_empty() {
            warn!("Boundary source contains no features");
        }

        let mut features = Vec::with_capacity(collection.features.len());
        let mut by_name: HashMap<String, usize> = HashMap::new();
        let mut by_city: HashMap<String, Vec<usize>> = HashMap::new();

        for (i, feature) in collection.features.into_iter().enumerate() {
            let raw_name = feature_name(&feature).ok_or_else(|| SigunguError::MissingName {
                index: i,
                tried: NAME_PROPERTIES.join(", "),
            })?;
            let name = RegionKey::new(raw_name).into_string();

            // Premier arrivé gagne pour la recherche exacte
            if let Some(&existing) = by_name.get(&name) {
                warn!(
                    name = name.as_str(),
                    first = existing,
                    duplicate = i,
                    "Duplicate canonical name, exact lookup keeps the first"
                );
            } else {
                by_name.insert(name.clone(), i);
            }

            // Token ville/arrondissement: la partie après le premier espace
            if let (_, Some(city)) = split_region(&name) {
                by_city.entry(city.to_string()).or_default().push(i);
            }

            features.push(CanonicalFeature {
                name,
                geometry: feature.geometry,
            });
        }

        Ok(Self {
            features,
            by_name,
            by_city,
            fingerprint,
        })
    }

    /// Nombre de features canoniques
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Les features canoniques, dans l'ordre du document source
    pub fn features(&self) -> &[CanonicalFeature] {
        &self.features
    }

    /// Les noms canoniques, dans l'ordre du document source
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.name.as_str())
    }

    /// Recherche exacte d'un nom canonique
    pub fn lookup_exact(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Toutes les features dont le token ville/arrondissement égale `token`.
    ///
    /// Les égalités sont retournées dans l'ordre du document source, et
    /// l'appelant les applique TOUTES (la règle somme-sur-toutes-les-égalités
    /// de l'agrégateur).
    pub fn lookup_by_city_suffix(&self, token: &str) -> &[usize] {
        self.by_city.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tokens ville/arrondissement partagés par plusieurs features.
    ///
    /// C'est là qu'un compte brut peut être dupliqué par la règle
    /// somme-sur-toutes-les-égalités; exposé pour diagnostic.
    pub fn ambiguous_city_tokens(&self) -> Vec<(&str, &[usize])> {
        let mut ambiguous: Vec<(&str, &[usize])> = self
            .by_city
            .iter()
            .filter(|(_, indices)| indices.len() > 1)
            .map(|(token, indices)| (token.as_str(), indices.as_slice()))
            .collect();
        ambiguous.sort_by_key(|(token, _)| *token);
        ambiguous
    }

    /// Empreinte blake3 du contenu de la source
    pub fn fingerprint(&self) -> &[u8; 32] {
        &self.fingerprint
    }
}

/// Extrait le nom d'affichage d'une feature GeoJSON
fn feature_name(feature: &geojson::Feature) -> Option<&str> {
    let properties = feature.properties.as_ref()?;
    NAME_PROPERTIES
        .iter()
        .find_map(|key| properties.get(*key).and_then(|v| v.as_str()))
}
