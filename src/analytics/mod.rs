// ============================================================================
// Module : analytics
// ============================================================================
// Le coeur du tableau de bord : des fonctions pures sur le Dataset, sans
// aucune dépendance vers l'interface (ratatui, crossterm)
// ============================================================================

pub mod scale;     // Choix de l'unité (K/M/B) et formatage des montants
pub mod race;      // Classement cumulé dans le temps
pub mod countries; // Normalisation des nationalités pour la carte
pub mod queries;   // Pipelines des graphiques

// Re-exports pour simplifier les imports
pub use queries::RaceGroup;
pub use race::{rank_over_time, RaceFrame, RaceFrames, RankedFrame};
pub use scale::{choose_scale, choose_scale_for, format_raw, format_value, ScaleChoice};
