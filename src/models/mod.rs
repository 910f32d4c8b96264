// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod transfer; // Un transfert (TransferRecord, Position, Foot)
pub mod filter;   // Critères de filtrage explicites
pub mod dataset;  // Table en mémoire, en lecture seule

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use footdash::models::transfer::TransferRecord;
// On peut faire : use footdash::models::TransferRecord;
pub use dataset::Dataset;
pub use filter::TransferFilter;
pub use transfer::{Foot, Position, TransferRecord};
