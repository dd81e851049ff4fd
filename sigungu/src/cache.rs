//! Mémoïsation adressée par contenu
//!
//! Les mêmes couples (index, comptes) reviennent à chaque re-sélection de
//! période dans l'interface. Le chargement et l'agrégation étant purs,
//! leurs résultats se mémoïsent sur une empreinte stable du contenu des
//! entrées. Table explicite avec invalidation explicite: pas de cadre
//! réactif, pas d'état ambiant.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::aggregate::CountAggregator;
use crate::error::SigunguError;
use crate::index::GeoFeatureIndex;
use crate::types::Aggregation;

/// Empreinte blake3 d'une entrée de cache
pub type Fingerprint = [u8; 32];

/// Empreinte stable d'un appel d'agrégation: contenu de l'index plus
/// table d'entrée sérialisée (l'ordre du BTreeMap est canonique)
pub fn aggregation_fingerprint(
    index: &GeoFeatureIndex,
    counts: &BTreeMap<String, i64>,
) -> Fingerprint {
    let mut hasher = blake3::Hasher::new();
    hasher.update(index.fingerprint());
    for (region, count) in counts {
        hasher.update(region.as_bytes());
        hasher.update(&[0]);
        hasher.update(&count.to_le_bytes());
    }
    *hasher.finalize().as_bytes()
}

/// Chargements de frontières mémoïsés par hash du contenu source
#[derive(Debug, Default)]
pub struct IndexCache {
    entries: HashMap<Fingerprint, Arc<GeoFeatureIndex>>,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Charge (ou récupère) l'index pour une source GeoJSON.
    ///
    /// Les erreurs ne sont pas mises en cache: une source corrigée se
    /// recharge au prochain appel.
    pub fn load_str(&mut self, source: &str) -> Result<Arc<GeoFeatureIndex>, SigunguError> {
        let key = *blake3::hash(source.as_bytes()).as_bytes();
        if let Some(index) = self.entries.get(&key) {
            return Ok(Arc::clone(index));
        }

        let index = Arc::new(GeoFeatureIndex::from_geojson_str(source)?);
        self.entries.insert(key, Arc::clone(&index));
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Passes d'agrégation mémoïsées par empreinte (index, comptes)
#[derive(Debug, Default)]
pub struct AggregateCache {
    entries: HashMap<Fingerprint, Arc<Aggregation>>,
}

impl AggregateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exécute (ou récupère) la passe d'agrégation pour ces entrées.
    ///
    /// La valeur rendue est partagée: cloner l'`Aggregation` avant de la
    /// classifier avec un autre barème.
    pub fn get_or_aggregate(
        &mut self,
        aggregator: &CountAggregator,
        index: &GeoFeatureIndex,
        counts: &BTreeMap<String, i64>,
    ) -> Result<Arc<Aggregation>, SigunguError> {
        let key = aggregation_fingerprint(index, counts);
        if let Some(aggregation) = self.entries.get(&key) {
            return Ok(Arc::clone(aggregation));
        }

        let aggregation = Arc::new(aggregator.aggregate(index, counts)?);
        self.entries.insert(key, Arc::clone(&aggregation));
        Ok(aggregation)
    }

    /// Retire une entrée; retourne vrai si elle existait
    pub fn invalidate(&mut self, key: &Fingerprint) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
