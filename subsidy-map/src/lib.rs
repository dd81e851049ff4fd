//! # subsidy-map
//!
//! Surface fichier au-dessus du moteur `sigungu`: ingestion des comptes
//! bruts (JSON ou CSV), export GeoJSON enrichi pour la couche de rendu,
//! rapport d'agrégation avec la liste des régions non résolues.
//!
//! ## Usage CLI
//!
//! ```bash
//! # Agrégation vers GeoJSON enrichi + rapport
//! subsidy-map aggregate --boundaries sigungu.geojson --counts 2024-q1.csv \
//!     --output choropleth.geojson --report report.json --period 2024-Q1
//!
//! # Diagnostic du jeu de frontières
//! subsidy-map inspect --boundaries sigungu.geojson
//! ```

pub mod counts;
pub mod export;
pub mod report;

pub use report::{AggregateStatus, AggregationReport};
