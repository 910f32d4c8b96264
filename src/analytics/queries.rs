// ============================================================================
// Queries : pipelines filtre -> regroupement -> agrégat
// ============================================================================
// Chaque fonction alimente un graphique du tableau de bord. Toutes sont
// pures : elles lisent le Dataset, appliquent le TransferFilter reçu et
// retournent des valeurs prêtes à afficher.
//
// CONCEPTS RUST :
// 1. BTreeMap pour les regroupements : résultats triés sans effort
// 2. Emprunts : on regroupe sur des &str empruntés au Dataset
// 3. Iterator chaining : filtered() -> fold/collect
// ============================================================================

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analytics::countries::{normalize_country, MAP_COUNTRIES};
use crate::analytics::race::{rank_over_time, RankedFrame};
use crate::models::{Dataset, Foot, Position, TransferFilter, TransferRecord};

/// Une valeur par année
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

/// Une valeur par (année, championnat)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueYearValue {
    pub year: i32,
    pub league: String,
    pub value: f64,
}

/// Un total nommé (pays, championnat)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedTotal {
    pub name: String,
    pub value: f64,
}

/// Un point du nuage montant / âge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgePoint {
    pub age: i32,
    pub fee: f64,
    pub year: i32,
    pub player_name: String,
    pub club_from: String,
    pub club_to: String,
    pub position: Option<Position>,
}

/// Montant médian pour un pied préféré
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootMedian {
    pub foot: Foot,
    pub median: f64,
}

// ============================================================================
// Enum : RaceGroup
// ============================================================================
// CONCEPT RUST : Enum qui porte son comportement
// - Chaque variant sait extraire sa clé et sa taille de classement
// - Les trois animations partagent le même pipeline
// ============================================================================

/// Dimension classée par une animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceGroup {
    League,
    Club,
    Player,
}

impl RaceGroup {
    /// Clé de regroupement d'un transfert
    pub fn key<'a>(&self, record: &'a TransferRecord) -> &'a str {
        match self {
            RaceGroup::League => &record.league_to,
            RaceGroup::Club => &record.club_to,
            RaceGroup::Player => &record.player_name,
        }
    }

    /// Nombre de groupes affichés par période
    pub fn default_top_n(&self) -> usize {
        match self {
            RaceGroup::League => 5,
            RaceGroup::Club => 20,
            RaceGroup::Player => 10,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RaceGroup::League => "League",
            RaceGroup::Club => "Club",
            RaceGroup::Player => "Player",
        }
    }
}

// ============================================================================
// Onglet "Time"
// ============================================================================

/// Plus gros transfert de chaque année, années croissantes
pub fn max_fee_per_year(dataset: &Dataset, filter: &TransferFilter) -> Vec<YearValue> {
    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();

    for record in dataset.filtered(filter) {
        let max = by_year.entry(record.transfer_year).or_insert(record.fee);
        *max = max.max(record.fee);
    }

    into_year_values(by_year)
}

/// Dépenses annuelles des `n` championnats les plus dépensiers
///
/// Les championnats sont choisis sur leur total de la période filtrée.
/// À total égal, l'ordre alphabétique départage.
pub fn top_league_trends(dataset: &Dataset, filter: &TransferFilter, n: usize) -> Vec<LeagueYearValue> {
    let mut by_year_league: BTreeMap<(i32, &str), f64> = BTreeMap::new();
    let mut by_league: BTreeMap<&str, f64> = BTreeMap::new();

    for record in dataset.filtered(filter) {
        *by_year_league
            .entry((record.transfer_year, record.league_to.as_str()))
            .or_insert(0.0) += record.fee;
        *by_league.entry(record.league_to.as_str()).or_insert(0.0) += record.fee;
    }

    let mut totals: Vec<(&str, f64)> = by_league.into_iter().collect();
    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
    let top: BTreeSet<&str> = totals.into_iter().take(n).map(|(league, _)| league).collect();

    by_year_league
        .into_iter()
        .filter(|((_, league), _)| top.contains(league))
        .map(|((year, league), value)| LeagueYearValue {
            year,
            league: league.to_string(),
            value,
        })
        .collect()
}

/// Nuage montant / âge (les transferts sans âge connu sont ignorés)
pub fn fee_vs_age(dataset: &Dataset, filter: &TransferFilter) -> Vec<AgePoint> {
    dataset
        .filtered(filter)
        .filter_map(|record| {
            record.player_age.map(|age| AgePoint {
                age,
                fee: record.fee,
                year: record.transfer_year,
                player_name: record.player_name.clone(),
                club_from: record.club_from.clone(),
                club_to: record.club_to.clone(),
                position: record.position,
            })
        })
        .collect()
}

/// Total des transferts payants par nationalité, pour la carte
///
/// Tous les pays de la carte sont présents (0 sans données), ainsi que les
/// nationalités inconnues de la carte. Tri décroissant, puis par nom.
pub fn fees_by_country(dataset: &Dataset, filter: &TransferFilter) -> Vec<NamedTotal> {
    let mut by_country: BTreeMap<&str, f64> = MAP_COUNTRIES.iter().map(|c| (*c, 0.0)).collect();

    for record in dataset.filtered(filter).filter(|r| r.is_paid()) {
        if let Some(country) = record.country.as_deref() {
            *by_country.entry(normalize_country(country)).or_insert(0.0) += record.fee;
        }
    }

    sorted_totals(by_country)
}

// ============================================================================
// Onglet "Leagues"
// ============================================================================

/// Total des transferts payants par championnat, décroissant
pub fn league_totals(dataset: &Dataset, filter: &TransferFilter) -> Vec<NamedTotal> {
    let mut by_league: BTreeMap<&str, f64> = BTreeMap::new();

    for record in dataset.filtered(filter).filter(|r| r.is_paid()) {
        *by_league.entry(record.league_to.as_str()).or_insert(0.0) += record.fee;
    }

    sorted_totals(by_league)
}

/// Classement cumulé par année pour une dimension donnée
///
/// CONCEPT : Composition
/// - Le filtre sélectionne les transferts
/// - rank_over_time fait tout le travail de classement
pub fn race(
    dataset: &Dataset,
    filter: &TransferFilter,
    group: RaceGroup,
    top_n: usize,
) -> Vec<RankedFrame<i32, String>> {
    let rows = rank_over_time(
        dataset.filtered(filter),
        |record| group.key(record).to_string(),
        |record| record.transfer_year,
        |record| record.fee,
        top_n,
    );

    debug!(group = group.label(), top_n, rows = rows.len(), "Race frames computed");
    rows
}

// ============================================================================
// Onglet "Clubs"
// ============================================================================

/// Clubs d'arrivée des championnats sélectionnés, triés
pub fn club_options(dataset: &Dataset, leagues: &BTreeSet<String>) -> Vec<String> {
    dataset
        .records()
        .iter()
        .filter(|r| leagues.contains(&r.league_to))
        .map(|r| r.club_to.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Total des transferts par année
pub fn fees_per_year(dataset: &Dataset, filter: &TransferFilter) -> Vec<YearValue> {
    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();

    for record in dataset.filtered(filter) {
        *by_year.entry(record.transfer_year).or_insert(0.0) += record.fee;
    }

    into_year_values(by_year)
}

// ============================================================================
// Onglet "Players"
// ============================================================================

/// Montant médian des transferts payants par pied préféré
///
/// Seuls les pieds présents dans les données filtrées apparaissent,
/// dans l'ordre de Foot::ALL.
pub fn median_fee_by_foot(dataset: &Dataset, filter: &TransferFilter) -> Vec<FootMedian> {
    let mut by_foot: BTreeMap<Foot, Vec<f64>> = BTreeMap::new();

    for record in dataset.filtered(filter).filter(|r| r.is_paid()) {
        by_foot.entry(record.foot).or_default().push(record.fee);
    }

    Foot::ALL
        .iter()
        .filter_map(|foot| {
            by_foot.remove(foot).and_then(median).map(|median| FootMedian {
                foot: *foot,
                median,
            })
        })
        .collect()
}

// ============================================================================
// Helpers
// ============================================================================

fn into_year_values(by_year: BTreeMap<i32, f64>) -> Vec<YearValue> {
    by_year
        .into_iter()
        .map(|(year, value)| YearValue { year, value })
        .collect()
}

/// Trie décroissant par valeur ; à égalité, l'ordre des clés (alphabétique)
fn sorted_totals(totals: BTreeMap<&str, f64>) -> Vec<NamedTotal> {
    let mut totals: Vec<NamedTotal> = totals
        .into_iter()
        .map(|(name, value)| NamedTotal {
            name: name.to_string(),
            value,
        })
        .collect();
    totals.sort_by(|a, b| b.value.total_cmp(&a.value));
    totals
}

/// Médiane (moyenne des deux valeurs centrales si le nombre est pair)
fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;

    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(player: &str, club: &str, league: &str, year: i32, fee: f64) -> TransferRecord {
        TransferRecord {
            player_name: player.to_string(),
            club_from: "Origin FC".to_string(),
            club_to: club.to_string(),
            league_to: league.to_string(),
            transfer_year: year,
            fee,
            player_age: Some(25),
            position: Some(Position::Attacker),
            foot: Foot::Right,
            country: Some("England".to_string()),
        }
    }

    fn sample() -> Dataset {
        Dataset::new(vec![
            record("Alpha", "Arsenal", "Premier League", 2015, 40e6),
            record("Bravo", "Chelsea", "Premier League", 2015, 60e6),
            record("Charlie", "Juventus", "Serie A", 2015, 30e6),
            record("Delta", "Arsenal", "Premier League", 2016, 10e6),
            record("Echo", "Milan", "Serie A", 2016, 0.0),
            record("Alpha", "Bayern", "Bundesliga", 2017, 80e6),
        ])
    }

    #[test]
    fn test_max_fee_per_year() {
        let values = max_fee_per_year(&sample(), &TransferFilter::new());
        assert_eq!(
            values,
            vec![
                YearValue { year: 2015, value: 60e6 },
                YearValue { year: 2016, value: 10e6 },
                YearValue { year: 2017, value: 80e6 },
            ]
        );
    }

    #[test]
    fn test_max_fee_per_year_respects_filter() {
        let values = max_fee_per_year(&sample(), &TransferFilter::new().years(2016..=2016));
        assert_eq!(values, vec![YearValue { year: 2016, value: 10e6 }]);
    }

    #[test]
    fn test_top_league_trends() {
        let values = top_league_trends(&sample(), &TransferFilter::new(), 2);

        // Premier League (110M) et Bundesliga (80M) ; Serie A (30M) exclue
        let leagues: BTreeSet<&str> = values.iter().map(|v| v.league.as_str()).collect();
        assert_eq!(leagues, BTreeSet::from(["Bundesliga", "Premier League"]));

        assert_eq!(values[0].year, 2015);
        assert_eq!(values[0].value, 100e6);
    }

    #[test]
    fn test_fee_vs_age_skips_unknown_age() {
        let mut records = sample().records().to_vec();
        records[0].player_age = None;
        let points = fee_vs_age(&Dataset::new(records), &TransferFilter::new());
        assert_eq!(points.len(), 5);
        assert_eq!(points[0].player_name, "Bravo");
    }

    #[test]
    fn test_fees_by_country() {
        let mut records = sample().records().to_vec();
        records[1].country = Some("Atlantis".to_string());
        records[2].country = None;
        let totals = fees_by_country(&Dataset::new(records), &TransferFilter::new());

        // Tous les pays de la carte + Atlantis
        assert_eq!(totals.len(), MAP_COUNTRIES.len() + 1);
        assert_eq!(totals[0], NamedTotal { name: "United Kingdom".to_string(), value: 130e6 });
        assert_eq!(totals[1], NamedTotal { name: "Atlantis".to_string(), value: 60e6 });

        let france = totals.iter().find(|t| t.name == "France").unwrap();
        assert_eq!(france.value, 0.0);
    }

    #[test]
    fn test_league_totals_paid_only_descending() {
        let totals = league_totals(&sample(), &TransferFilter::new());
        let names: Vec<&str> = totals.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Premier League", "Bundesliga", "Serie A"]);
        assert_eq!(totals[2].value, 30e6);
    }

    #[test]
    fn test_league_race() {
        let rows = race(&sample(), &TransferFilter::new(), RaceGroup::League, 5);

        let in_2016: Vec<(&str, f64, usize)> = rows
            .iter()
            .filter(|r| r.time == 2016)
            .map(|r| (r.group.as_str(), r.cumulative, r.rank))
            .collect();
        assert_eq!(in_2016, vec![("Premier League", 110e6, 1), ("Serie A", 30e6, 2)]);

        // Bundesliga n'apparaît qu'en 2017
        assert!(rows.iter().filter(|r| r.group == "Bundesliga").all(|r| r.time == 2017));
    }

    #[test]
    fn test_player_race_sums_across_clubs() {
        let rows = race(&sample(), &TransferFilter::new(), RaceGroup::Player, 1);
        let last = rows.last().unwrap();
        assert_eq!(last.time, 2017);
        assert_eq!(last.group, "Alpha");
        assert_eq!(last.cumulative, 120e6);
        assert_eq!(last.rank, 1);
    }

    #[test]
    fn test_race_group_defaults() {
        assert_eq!(RaceGroup::League.default_top_n(), 5);
        assert_eq!(RaceGroup::Club.default_top_n(), 20);
        assert_eq!(RaceGroup::Player.default_top_n(), 10);
    }

    #[test]
    fn test_club_options() {
        let leagues = BTreeSet::from(["Premier League".to_string()]);
        assert_eq!(club_options(&sample(), &leagues), vec!["Arsenal", "Chelsea"]);
        assert!(club_options(&sample(), &BTreeSet::new()).is_empty());
    }

    #[test]
    fn test_fees_per_year_with_clubs() {
        let filter = TransferFilter::new()
            .leagues(["Premier League"])
            .clubs(["Arsenal"]);
        let values = fees_per_year(&sample(), &filter);
        assert_eq!(
            values,
            vec![
                YearValue { year: 2015, value: 40e6 },
                YearValue { year: 2016, value: 10e6 },
            ]
        );
    }

    #[test]
    fn test_median_fee_by_foot() {
        let mut records = sample().records().to_vec();
        records[0].foot = Foot::Left;
        let medians = median_fee_by_foot(&Dataset::new(records), &TransferFilter::new());

        // Right : 60M, 30M, 10M, 80M (Echo gratuit ignoré) -> (30 + 60) / 2
        assert_eq!(
            medians,
            vec![
                FootMedian { foot: Foot::Left, median: 40e6 },
                FootMedian { foot: Foot::Right, median: 45e6 },
            ]
        );
    }

    #[test]
    fn test_empty_dataset_gives_empty_results() {
        let dataset = Dataset::default();
        let filter = TransferFilter::new();
        assert!(max_fee_per_year(&dataset, &filter).is_empty());
        assert!(top_league_trends(&dataset, &filter, 5).is_empty());
        assert!(league_totals(&dataset, &filter).is_empty());
        assert!(race(&dataset, &filter, RaceGroup::Club, 20).is_empty());
        assert!(median_fee_by_foot(&dataset, &filter).is_empty());
        assert_eq!(fees_by_country(&dataset, &filter).len(), MAP_COUNTRIES.len());
    }

    #[test]
    fn test_median() {
        assert_eq!(median(vec![]), None);
        assert_eq!(median(vec![3.0]), Some(3.0));
        assert_eq!(median(vec![4.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(vec![4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }
}
