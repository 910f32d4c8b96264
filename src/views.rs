// ============================================================================
// Views : données prêtes à dessiner pour chaque onglet
// ============================================================================
// Une vue regroupe les résultats des requêtes d'un onglet. Elle est
// recalculée par l'application quand un filtre change, puis lue par l'UI
// à chaque frame sans nouveau calcul.
//
// CONCEPTS RUST :
// 1. Structs "value objects" : aucune référence vers le Dataset
// 2. Fonctions associées compute() : pures, Dataset + filtres en entrée
// ============================================================================

use std::collections::BTreeSet;

use crate::analytics::queries::{
    self, AgePoint, FootMedian, LeagueYearValue, NamedTotal, RaceGroup, YearValue,
};
use crate::analytics::RaceFrames;
use crate::models::{Dataset, TransferFilter};

/// Nombre de championnats suivis dans la courbe de l'onglet Time
pub const TOP_LEAGUE_TRENDS: usize = 5;

/// Classement animé : les images + la dimension classée
pub type Race = RaceFrames<i32, String>;

/// Onglet "Time" : plage d'années uniquement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeView {
    pub max_fee_per_year: Vec<YearValue>,
    pub league_trends: Vec<LeagueYearValue>,
    pub fee_vs_age: Vec<AgePoint>,
    pub countries: Vec<NamedTotal>,
}

impl TimeView {
    pub fn compute(dataset: &Dataset, filter: &TransferFilter) -> Self {
        Self {
            max_fee_per_year: queries::max_fee_per_year(dataset, filter),
            league_trends: queries::top_league_trends(dataset, filter, TOP_LEAGUE_TRENDS),
            fee_vs_age: queries::fee_vs_age(dataset, filter),
            countries: queries::fees_by_country(dataset, filter),
        }
    }
}

/// Onglet "Leagues" : âge, postes, pieds
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaguesView {
    pub totals: Vec<NamedTotal>,
    pub race: Race,
}

impl LeaguesView {
    pub fn compute(dataset: &Dataset, filter: &TransferFilter) -> Self {
        Self {
            totals: queries::league_totals(dataset, filter),
            race: race(dataset, filter, RaceGroup::League),
        }
    }
}

/// Onglet "Clubs" : années, championnats, clubs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClubsView {
    pub race: Race,
    pub club_options: Vec<String>,
    pub fees_per_year: Vec<YearValue>,
}

impl ClubsView {
    /// `race_filter` ignore la sélection de clubs, `bar_filter` l'applique
    pub fn compute(
        dataset: &Dataset,
        race_filter: &TransferFilter,
        bar_filter: &TransferFilter,
        leagues: &BTreeSet<String>,
    ) -> Self {
        Self {
            race: race(dataset, race_filter, RaceGroup::Club),
            club_options: queries::club_options(dataset, leagues),
            fees_per_year: queries::fees_per_year(dataset, bar_filter),
        }
    }
}

/// Onglet "Players" : années
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayersView {
    pub race: Race,
    pub foot_medians: Vec<FootMedian>,
}

impl PlayersView {
    pub fn compute(dataset: &Dataset, filter: &TransferFilter) -> Self {
        Self {
            race: race(dataset, filter, RaceGroup::Player),
            foot_medians: queries::median_fee_by_foot(dataset, filter),
        }
    }
}

fn race(dataset: &Dataset, filter: &TransferFilter, group: RaceGroup) -> Race {
    RaceFrames::from_rows(queries::race(dataset, filter, group, group.default_top_n()))
}

// ============================================================================
// Tests unitaires
// ============================================================================
