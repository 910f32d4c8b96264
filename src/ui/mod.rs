// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod events;    // Gestion des événements clavier
pub mod dashboard; // Onglets, filtres, footer
pub mod chart;     // Histogrammes, courbes, nuage de points
pub mod race_text; // Classements animés (barres Unicode)

// Re-exports pour simplifier les imports
pub use events::{Event, EventHandler};
pub use dashboard::render;
