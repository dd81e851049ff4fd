//! Normalisation des noms de régions en clés de recherche

use std::fmt;

use unicode_normalization::UnicodeNormalization;

/// Un nom administratif normalisé, utilisé comme clé de recherche.
///
/// La normalisation compose le Hangul en NFC (les exports tableur peuvent
/// livrer des jamo décomposés) puis réduit les suites d'espaces à un seul
/// espace. Les noms canoniques et les clés brutes passent par la même
/// normalisation, l'égalité est donc bien définie des deux côtés.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionKey(String);

impl RegionKey {
    /// Normalise une chaîne brute en clé
    pub fn new(raw: &str) -> Self {
        let composed: String = raw.nfc().collect();
        let collapsed = composed.split_whitespace().collect::<Vec<_>>().join(" ");
        Self(collapsed)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
