// ============================================================================
// Structure : TransferFilter
// ============================================================================
// Paramètres de filtrage explicites, passés à chaque requête
//
// CONCEPTS RUST :
// 1. Builder pattern : chaque méthode consomme self et le retourne
// 2. Option<T> pour les critères : None = pas de restriction
// 3. RangeInclusive<T> : bornes incluses, comme les sliders de l'UI
// ============================================================================

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use crate::models::{Foot, Position, TransferRecord};

/// Critères de filtrage d'un transfert
///
/// CONCEPT : État de filtre explicite
/// - L'UI ne stocke pas de "widget state" implicite
/// - Elle construit un TransferFilter et le passe aux requêtes
/// - Deux filtres égaux produisent toujours le même résultat
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferFilter {
    /// Années de transfert (bornes incluses)
    pub years: Option<RangeInclusive<i32>>,

    /// Âges au transfert (bornes incluses)
    /// Un transfert sans âge connu ne passe jamais ce critère
    pub ages: Option<RangeInclusive<i32>>,

    /// Postes acceptés (un poste inconnu ne passe jamais)
    pub positions: Option<BTreeSet<Position>>,

    /// Pieds préférés acceptés
    pub feet: Option<BTreeSet<Foot>>,

    /// Championnats d'arrivée acceptés (ensemble vide = aucun transfert)
    pub leagues: Option<BTreeSet<String>>,

    /// Clubs d'arrivée acceptés
    /// Une sélection vide est traitée comme "pas de restriction"
    pub clubs: Option<BTreeSet<String>>,

    /// Ne garde que les transferts payants (fee > 0)
    pub paid_only: bool,
}

impl TransferFilter {
    /// Filtre qui accepte tout
    pub fn new() -> Self {
        Self::default()
    }

    pub fn years(mut self, range: RangeInclusive<i32>) -> Self {
        self.years = Some(range);
        self
    }

    pub fn ages(mut self, range: RangeInclusive<i32>) -> Self {
        self.ages = Some(range);
        self
    }

    pub fn positions<I: IntoIterator<Item = Position>>(mut self, positions: I) -> Self {
        self.positions = Some(positions.into_iter().collect());
        self
    }

    pub fn feet<I: IntoIterator<Item = Foot>>(mut self, feet: I) -> Self {
        self.feet = Some(feet.into_iter().collect());
        self
    }

    pub fn leagues<I, S>(mut self, leagues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.leagues = Some(leagues.into_iter().map(Into::into).collect());
        self
    }

    pub fn clubs<I, S>(mut self, clubs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clubs = Some(clubs.into_iter().map(Into::into).collect());
        self
    }

    pub fn paid_only(mut self) -> Self {
        self.paid_only = true;
        self
    }

    /// Vérifie si un transfert passe tous les critères
    ///
    /// CONCEPT RUST : Early return
    /// - Chaque critère non satisfait retourne false immédiatement
    /// - Les critères absents (None) sont ignorés
    pub fn matches(&self, record: &TransferRecord) -> bool {
        if let Some(years) = &self.years {
            if !years.contains(&record.transfer_year) {
                return false;
            }
        }

        if let Some(ages) = &self.ages {
            match record.player_age {
                Some(age) if ages.contains(&age) => {}
                _ => return false,
            }
        }

        if let Some(positions) = &self.positions {
            match record.position {
                Some(position) if positions.contains(&position) => {}
                _ => return false,
            }
        }

        if let Some(feet) = &self.feet {
            if !feet.contains(&record.foot) {
                return false;
            }
        }

        if let Some(leagues) = &self.leagues {
            if !leagues.contains(&record.league_to) {
                return false;
            }
        }

        if let Some(clubs) = &self.clubs {
            if !clubs.is_empty() && !clubs.contains(&record.club_to) {
                return false;
            }
        }

        !self.paid_only || record.is_paid()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, age: Option<i32>, fee: f64) -> TransferRecord {
        TransferRecord {
            player_name: "Player".to_string(),
            club_from: "From FC".to_string(),
            club_to: "To FC".to_string(),
            league_to: "Serie A".to_string(),
            transfer_year: year,
            fee,
            player_age: age,
            position: Some(Position::Midfielder),
            foot: Foot::Left,
            country: Some("Italy".to_string()),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = TransferFilter::new();
        assert!(filter.matches(&record(1990, None, 0.0)));
    }

    #[test]
    fn test_year_range_is_inclusive() {
        let filter = TransferFilter::new().years(2014..=2016);
        assert!(filter.matches(&record(2014, None, 0.0)));
        assert!(filter.matches(&record(2016, None, 0.0)));
        assert!(!filter.matches(&record(2013, None, 0.0)));
        assert!(!filter.matches(&record(2017, None, 0.0)));
    }

    #[test]
    fn test_missing_age_never_matches_age_range() {
        let filter = TransferFilter::new().ages(18..=30);
        assert!(filter.matches(&record(2020, Some(18), 0.0)));
        assert!(!filter.matches(&record(2020, Some(31), 0.0)));
        assert!(!filter.matches(&record(2020, None, 0.0)));
    }

    #[test]
    fn test_positions_and_feet() {
        let filter = TransferFilter::new()
            .positions([Position::Attacker])
            .feet([Foot::Left]);
        assert!(!filter.matches(&record(2020, Some(20), 0.0)));

        let filter = TransferFilter::new()
            .positions([Position::Midfielder, Position::Defender])
            .feet([Foot::Left, Foot::Both]);
        assert!(filter.matches(&record(2020, Some(20), 0.0)));

        let mut unknown = record(2020, Some(20), 0.0);
        unknown.position = None;
        assert!(!filter.matches(&unknown));
    }

    #[test]
    fn test_empty_league_set_matches_nothing() {
        let filter = TransferFilter::new().leagues(Vec::<String>::new());
        assert!(!filter.matches(&record(2020, None, 0.0)));

        let filter = TransferFilter::new().leagues(["Serie A"]);
        assert!(filter.matches(&record(2020, None, 0.0)));
    }

    #[test]
    fn test_empty_club_selection_is_no_restriction() {
        let filter = TransferFilter::new().clubs(Vec::<String>::new());
        assert!(filter.matches(&record(2020, None, 0.0)));

        let filter = TransferFilter::new().clubs(["Other FC"]);
        assert!(!filter.matches(&record(2020, None, 0.0)));
    }

    #[test]
    fn test_paid_only() {
        let filter = TransferFilter::new().paid_only();
        assert!(!filter.matches(&record(2020, None, 0.0)));
        assert!(filter.matches(&record(2020, None, 5.0)));
    }
}
