// ============================================================================
// Module : data
// ============================================================================
// Chargement du jeu de données des transferts depuis le disque
// ============================================================================

pub mod loader; // Lecture CSV / CSV.gz -> Dataset

// Re-export des fonctions principales
pub use loader::{load_dataset, read_transfers, LoadStats};
