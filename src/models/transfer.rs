// ============================================================================
// Structure : TransferRecord
// ============================================================================
// Représente un transfert historique d'un joueur entre deux clubs
//
// CONCEPTS RUST :
// 1. Enums fermés : Position et Foot n'acceptent qu'un petit ensemble de valeurs
// 2. Option<T> : l'âge est absent quand la date de naissance est inconnue
// 3. Immutabilité : un TransferRecord n'est jamais modifié après chargement
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Poste du joueur (ensemble fermé)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    Attacker,
    Midfielder,
    Defender,
    Goalkeeper,
}

impl Position {
    /// Tous les postes, dans l'ordre d'affichage
    pub const ALL: [Position; 4] = [
        Position::Attacker,
        Position::Midfielder,
        Position::Defender,
        Position::Goalkeeper,
    ];

    /// Retourne le label pour l'affichage
    pub fn label(&self) -> &'static str {
        match self {
            Position::Attacker => "Attacker",
            Position::Midfielder => "Midfielder",
            Position::Defender => "Defender",
            Position::Goalkeeper => "Goalkeeper",
        }
    }
}

impl FromStr for Position {
    type Err = String;

    /// CONCEPT RUST : trait FromStr
    /// - Permet d'écrire "Attacker".parse::<Position>()
    /// - Insensible à la casse, le CSV n'est pas toujours homogène
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attacker" | "attack" => Ok(Position::Attacker),
            "midfielder" | "midfield" => Ok(Position::Midfielder),
            "defender" | "defence" | "defense" => Ok(Position::Defender),
            "goalkeeper" => Ok(Position::Goalkeeper),
            other => Err(format!("unknown position '{}'", other)),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pied préféré du joueur
///
/// Une valeur absente ou inconnue dans le CSV devient `Foot::Unknown`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Foot {
    Left,
    Right,
    Both,
    Unknown,
}

impl Foot {
    pub const ALL: [Foot; 4] = [Foot::Left, Foot::Right, Foot::Both, Foot::Unknown];

    pub fn label(&self) -> &'static str {
        match self {
            Foot::Left => "left",
            Foot::Right => "right",
            Foot::Both => "both",
            Foot::Unknown => "Unknown",
        }
    }

    /// Convertit une valeur brute du CSV (jamais d'échec)
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("left") => Foot::Left,
            Some("right") => Foot::Right,
            Some("both") => Foot::Both,
            _ => Foot::Unknown,
        }
    }
}

impl fmt::Display for Foot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Un transfert, avec les champs dérivés (année, âge) déjà calculés
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Nom du joueur (ex: "Neymar")
    pub player_name: String,

    /// Club de départ
    pub club_from: String,

    /// Club d'arrivée
    pub club_to: String,

    /// Championnat du club d'arrivée, déjà normalisé ("Premier League")
    pub league_to: String,

    /// Année du transfert (dérivée de la date)
    pub transfer_year: i32,

    /// Montant du transfert (0 = gratuit ou inconnu)
    pub fee: f64,

    /// Âge au moment du transfert (None si date de naissance inconnue)
    pub player_age: Option<i32>,

    /// Poste (None si la valeur du CSV n'est pas reconnue)
    pub position: Option<Position>,

    pub foot: Foot,

    /// Nationalité telle qu'écrite dans la source (ex: "England")
    pub country: Option<String>,
}

impl TransferRecord {
    /// Indique si le transfert a un montant connu et positif
    pub fn is_paid(&self) -> bool {
        self.fee > 0.0
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
