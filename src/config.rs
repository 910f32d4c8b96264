// ============================================================================
// Configuration
// ============================================================================
// Paramètres d'exécution lus depuis l'environnement (et la ligne de commande
// pour le chemin du jeu de données), avec des valeurs par défaut
//
// Variables reconnues :
// - FOOTDASH_DATA       : chemin du CSV (défaut : master_cleaned_reduced.csv.gz)
// - FOOTDASH_LOG_DIR    : répertoire des logs
// - FOOTDASH_RACE_TICKS : nombre de ticks (250ms) par image d'animation
// ============================================================================

use std::path::PathBuf;

/// Fichier chargé si rien n'est précisé
pub const DEFAULT_DATA_PATH: &str = "master_cleaned_reduced.csv.gz";

/// 4 ticks de 250ms : une image par seconde
pub const DEFAULT_RACE_TICKS: u32 = 4;

/// Première année de la plage sélectionnée par défaut
pub const DEFAULT_START_YEAR: i32 = 2014;

/// Plage d'âges sélectionnée par défaut
pub const DEFAULT_AGE_RANGE: (i32, i32) = (18, 30);

/// Nombre de championnats présélectionnés dans l'onglet Clubs
pub const DEFAULT_LEAGUE_SELECTION: usize = 3;

/// Configuration complète de l'application
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Fichier CSV des transferts
    pub data_path: PathBuf,

    /// Répertoire des logs (rotation quotidienne)
    pub log_dir: PathBuf,

    /// Ticks entre deux images des animations de classement
    pub race_ticks_per_frame: u32,
}

impl Config {
    /// Construit la configuration depuis l'environnement du processus
    ///
    /// Le premier argument de la ligne de commande, s'il existe, remplace
    /// FOOTDASH_DATA.
    pub fn from_env() -> Self {
        let cli_path = std::env::args().nth(1);
        Self::from_lookup(|key| std::env::var(key).ok(), cli_path)
    }

    /// CONCEPT RUST : Injection d'une closure
    /// - La lecture de l'environnement est passée en paramètre
    /// - Les tests fournissent leur propre "environnement" sans toucher au vrai
    pub fn from_lookup<F>(lookup: F, cli_path: Option<String>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_path = cli_path
            .or_else(|| lookup("FOOTDASH_DATA"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let log_dir = lookup("FOOTDASH_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_log_dir);

        // Une valeur illisible ou nulle retombe sur la valeur par défaut
        let race_ticks_per_frame = lookup("FOOTDASH_RACE_TICKS")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|ticks| *ticks > 0)
            .unwrap_or(DEFAULT_RACE_TICKS);

        Self {
            data_path,
            log_dir,
            race_ticks_per_frame,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None, None)
    }
}

/// Répertoire de logs par défaut
///
/// - Linux/WSL : ~/.local/share/footdash/logs
/// - macOS : ~/Library/Application Support/footdash/logs
/// - Windows : C:\Users\<user>\AppData\Local\footdash\logs
/// - Sinon : ./logs
fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("footdash").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

// ============================================================================
// Tests unitaires
// ============================================================================
