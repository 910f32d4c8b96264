// ============================================================================
// Structure : Dataset
// ============================================================================
// Table en mémoire des transferts, chargée une fois au démarrage
//
// CONCEPTS RUST :
// 1. Ownership : le Dataset possède ses transferts (Vec<TransferRecord>)
// 2. Lecture seule : aucune méthode ne prend &mut self
// 3. impl Iterator : retourne un itérateur paresseux sans allouer
// ============================================================================

use std::collections::BTreeSet;

use crate::models::{TransferFilter, TransferRecord};

/// Handle en lecture seule sur la table des transferts
///
/// CONCEPT : Injection de dépendance
/// - Pas de variable globale : l'hôte possède le Dataset
/// - Chaque requête reçoit un &Dataset en paramètre
/// - Partageable entre threads via Arc<Dataset> (aucun écrivain)
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<TransferRecord>,
}

impl Dataset {
    pub fn new(records: Vec<TransferRecord>) -> Self {
        Self { records }
    }

    /// Tous les transferts, dans l'ordre du fichier source
    pub fn records(&self) -> &[TransferRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Transferts qui passent le filtre, dans l'ordre du fichier source
    ///
    /// CONCEPT RUST : impl Trait en retour + lifetime
    /// - L'itérateur emprunte self et filter
    /// - Rien n'est copié tant qu'on ne collecte pas
    pub fn filtered<'a>(
        &'a self,
        filter: &'a TransferFilter,
    ) -> impl Iterator<Item = &'a TransferRecord> + 'a {
        self.records.iter().filter(move |record| filter.matches(record))
    }

    /// Années min et max présentes (None si table vide)
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        bounds(self.records.iter().map(|r| r.transfer_year))
    }

    /// Âges min et max connus (None si aucun âge connu)
    pub fn age_bounds(&self) -> Option<(i32, i32)> {
        bounds(self.records.iter().filter_map(|r| r.player_age))
    }

    /// Championnats distincts, triés alphabétiquement
    pub fn leagues(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| !r.league_to.is_empty())
            .map(|r| r.league_to.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Calcule (min, max) en un seul passage
fn bounds(values: impl Iterator<Item = i32>) -> Option<(i32, i32)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((min, max)) => Some((min.min(v), max.max(v))),
    })
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Foot, Position};

    fn record(league: &str, year: i32, age: Option<i32>) -> TransferRecord {
        TransferRecord {
            player_name: "P".to_string(),
            club_from: "A".to_string(),
            club_to: "B".to_string(),
            league_to: league.to_string(),
            transfer_year: year,
            fee: 0.0,
            player_age: age,
            position: Some(Position::Attacker),
            foot: Foot::Right,
            country: None,
        }
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::default();
        assert!(dataset.is_empty());
        assert_eq!(dataset.year_bounds(), None);
        assert_eq!(dataset.age_bounds(), None);
        assert!(dataset.leagues().is_empty());
    }

    #[test]
    fn test_bounds_and_leagues() {
        let dataset = Dataset::new(vec![
            record("Serie A", 2018, Some(22)),
            record("Bundesliga", 2011, None),
            record("Serie A", 2021, Some(35)),
        ]);

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.year_bounds(), Some((2011, 2021)));
        assert_eq!(dataset.age_bounds(), Some((22, 35)));
        assert_eq!(dataset.leagues(), vec!["Bundesliga", "Serie A"]);
    }

    #[test]
    fn test_filtered_keeps_source_order() {
        let dataset = Dataset::new(vec![
            record("Serie A", 2018, None),
            record("Bundesliga", 2011, None),
            record("Serie A", 2021, None),
        ]);
        let filter = TransferFilter::new().leagues(["Serie A"]);

        let years: Vec<i32> = dataset.filtered(&filter).map(|r| r.transfer_year).collect();
        assert_eq!(years, vec![2018, 2021]);
    }
}
