// ============================================================================
// Footdash - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod config;    // Variables d'environnement et valeurs par défaut
pub mod models;    // Structures de données
pub mod data;      // Chargement du CSV des transferts
pub mod analytics; // Échelles, classements cumulés, requêtes
pub mod views;     // Données prêtes à dessiner par onglet
pub mod app;       // État de l'application
pub mod ui;        // Interface utilisateur
