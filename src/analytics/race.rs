// ============================================================================
// Race : classement cumulé dans le temps ("bar chart race")
// ============================================================================
// Transforme des transferts en lignes (période, groupe, cumul, rang) prêtes
// pour une animation de classement
//
// Algorithme :
// 1. Somme des valeurs par (période, groupe)
// 2. Par groupe, cumul des sommes dans l'ordre croissant des périodes
// 3. Par période, tri décroissant sur le cumul, rangs 1..N, top N conservé
// 4. Concaténation des périodes dans l'ordre croissant
//
// CONCEPTS RUST :
// 1. Génériques avec closures : Fn(&R) -> G pour extraire les clés
// 2. BTreeMap : clés ordonnées, donc périodes déjà triées
// 3. Tri stable (sort_by) : à égalité, le premier groupe rencontré gagne
// ============================================================================

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Une ligne du classement : un groupe à une période donnée
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFrame<T, G> {
    /// Période (ex: année de transfert)
    pub time: T,

    /// Groupe classé (ex: championnat, club, joueur)
    pub group: G,

    /// Total cumulé du groupe jusqu'à cette période incluse
    pub cumulative: f64,

    /// Rang dans la période, 1 = plus gros cumul
    pub rank: usize,
}

/// Calcule le classement cumulé par période
///
/// CONCEPT : Fonction pure
/// - Aucun état caché : deux appels identiques donnent la même séquence
/// - Entrée vide -> sortie vide
/// - top_n plus grand que le nombre de groupes -> tous les groupes
///
/// Un groupe sans activité sur une période n'apparaît pas dans cette
/// période : son cumul n'est pas reporté. C'est au consommateur (l'animation)
/// de le garder visible s'il le souhaite.
pub fn rank_over_time<I, R, T, G, FG, FT, FV>(
    records: I,
    group_key: FG,
    time_key: FT,
    value_key: FV,
    top_n: usize,
) -> Vec<RankedFrame<T, G>>
where
    I: IntoIterator<Item = R>,
    T: Ord + Clone,
    G: Eq + Hash + Clone,
    FG: Fn(&R) -> G,
    FT: Fn(&R) -> T,
    FV: Fn(&R) -> f64,
{
    // Ordre de première apparition des groupes (sert au départage)
    let mut group_index: HashMap<G, usize> = HashMap::new();
    let mut groups: Vec<G> = Vec::new();

    // Étape 1 : somme par (groupe, période)
    // per_group[i] : période -> somme, pour le groupe d'index i
    let mut per_group: Vec<BTreeMap<T, f64>> = Vec::new();

    for record in records {
        let group = group_key(&record);
        let index = *group_index.entry(group.clone()).or_insert_with(|| {
            groups.push(group);
            per_group.push(BTreeMap::new());
            groups.len() - 1
        });

        *per_group[index].entry(time_key(&record)).or_insert(0.0) += value_key(&record);
    }

    // Étape 2 : cumul par groupe, rangé par période
    // Les groupes sont parcourus dans l'ordre de première apparition,
    // donc chaque période liste ses groupes dans cet ordre
    let mut by_period: BTreeMap<T, Vec<(usize, f64)>> = BTreeMap::new();

    for (index, periods) in per_group.iter().enumerate() {
        let mut running = 0.0;
        for (time, total) in periods {
            running += total;
            by_period
                .entry(time.clone())
                .or_default()
                .push((index, running));
        }
    }

    // Étapes 3 et 4 : tri stable décroissant, rangs, top N
    let mut rows = Vec::new();

    for (time, mut entries) in by_period {
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));
        entries.truncate(top_n);

        rows.extend(entries.into_iter().enumerate().map(|(position, (index, cumulative))| {
            RankedFrame {
                time: time.clone(),
                group: groups[index].clone(),
                cumulative,
                rank: position + 1,
            }
        }));
    }

    trace!(groups = groups.len(), rows = rows.len(), top_n, "Computed ranked cumulative frames");
    rows
}

// ============================================================================
// RaceFrames : lignes regroupées par période pour l'animation
// ============================================================================

/// Une image de l'animation : le classement d'une période
#[derive(Debug, Clone, PartialEq)]
pub struct RaceFrame<T, G> {
    pub time: T,
    /// Lignes de la période, rang 1 en premier
    pub entries: Vec<RankedFrame<T, G>>,
}

/// Séquence d'images, dans l'ordre croissant des périodes
#[derive(Debug, Clone, PartialEq)]
pub struct RaceFrames<T, G> {
    frames: Vec<RaceFrame<T, G>>,
    max_cumulative: f64,
}

impl<T, G> Default for RaceFrames<T, G> {
    fn default() -> Self {
        Self {
            frames: Vec::new(),
            max_cumulative: 0.0,
        }
    }
}

impl<T: PartialEq + Clone, G> RaceFrames<T, G> {
    /// Regroupe la sortie de `rank_over_time` (déjà triée par période)
    pub fn from_rows(rows: Vec<RankedFrame<T, G>>) -> Self {
        let mut frames: Vec<RaceFrame<T, G>> = Vec::new();
        let mut max_cumulative: f64 = 0.0;

        for row in rows {
            max_cumulative = max_cumulative.max(row.cumulative);

            match frames.last_mut() {
                Some(frame) if frame.time == row.time => frame.entries.push(row),
                _ => frames.push(RaceFrame {
                    time: row.time.clone(),
                    entries: vec![row],
                }),
            }
        }

        Self {
            frames,
            max_cumulative,
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RaceFrame<T, G>> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[RaceFrame<T, G>] {
        &self.frames
    }

    /// Plus gros cumul de toute l'animation
    pub fn max_cumulative(&self) -> f64 {
        self.max_cumulative
    }

    /// Borne de l'axe des valeurs : 10% de marge au-dessus du max
    pub fn axis_max(&self) -> f64 {
        self.max_cumulative * 1.1
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn race(rows: &[(i32, &str, f64)], top_n: usize) -> Vec<RankedFrame<i32, String>> {
        rank_over_time(
            rows.iter(),
            |r| r.1.to_string(),
            |r| r.0,
            |r| r.2,
            top_n,
        )
    }

    fn frame(time: i32, group: &str, cumulative: f64, rank: usize) -> RankedFrame<i32, String> {
        RankedFrame {
            time,
            group: group.to_string(),
            cumulative,
            rank,
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(race(&[], 5).is_empty());
    }

    #[test]
    fn test_league_scenario() {
        let rows = race(
            &[(2020, "LeagueA", 100.0), (2020, "LeagueB", 50.0), (2021, "LeagueA", 30.0)],
            2,
        );

        assert_eq!(
            rows,
            vec![
                frame(2020, "LeagueA", 100.0, 1),
                frame(2020, "LeagueB", 50.0, 2),
                frame(2021, "LeagueA", 130.0, 1),
            ]
        );
    }

    #[test]
    fn test_same_period_values_are_summed() {
        let rows = race(&[(2019, "A", 10.0), (2019, "A", 15.0), (2019, "B", 20.0)], 5);
        assert_eq!(rows, vec![frame(2019, "A", 25.0, 1), frame(2019, "B", 20.0, 2)]);
    }

    #[test]
    fn test_cumulative_can_overtake() {
        let rows = race(
            &[
                (2018, "A", 100.0),
                (2018, "B", 60.0),
                (2019, "B", 60.0),
                (2019, "A", 10.0),
            ],
            5,
        );

        assert_eq!(
            rows,
            vec![
                frame(2018, "A", 100.0, 1),
                frame(2018, "B", 60.0, 2),
                frame(2019, "B", 120.0, 1),
                frame(2019, "A", 110.0, 2),
            ]
        );
    }

    #[test]
    fn test_top_n_truncates_each_period() {
        let rows = race(
            &[(2020, "A", 1.0), (2020, "B", 2.0), (2020, "C", 3.0), (2021, "A", 1.0)],
            2,
        );

        assert_eq!(
            rows,
            vec![
                frame(2020, "C", 3.0, 1),
                frame(2020, "B", 2.0, 2),
                frame(2021, "A", 2.0, 1),
            ]
        );
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let rows = race(&[(2020, "Z", 5.0), (2020, "A", 5.0), (2020, "M", 5.0)], 3);
        let groups: Vec<&str> = rows.iter().map(|r| r.group.as_str()).collect();
        assert_eq!(groups, vec!["Z", "A", "M"]);
    }

    #[test]
    fn test_periods_are_ascending_regardless_of_input_order() {
        let rows = race(&[(2022, "A", 1.0), (2010, "B", 1.0), (2015, "A", 1.0)], 5);
        let times: Vec<i32> = rows.iter().map(|r| r.time).collect();
        assert_eq!(times, vec![2010, 2015, 2022]);
        // Cumul de A : 1 en 2015, 2 en 2022
        assert_eq!(rows[2].cumulative, 2.0);
    }

    #[test]
    fn test_ranks_contiguous_and_monotonic() {
        let input: Vec<(i32, String, f64)> = (0..60)
            .map(|i| (2000 + i % 7, format!("G{}", i % 11), ((i * 37) % 23) as f64))
            .collect();
        let rows = rank_over_time(input.iter(), |r| r.1.clone(), |r| r.0, |r| r.2, 4);

        let frames = RaceFrames::from_rows(rows.clone());
        for frame in frames.frames() {
            let ranks: Vec<usize> = frame.entries.iter().map(|e| e.rank).collect();
            let expected: Vec<usize> = (1..=frame.entries.len()).collect();
            assert_eq!(ranks, expected);
            assert!(frame.entries.len() <= 4);
        }

        // Pour un groupe donné, le cumul ne décroît jamais
        let mut last: HashMap<String, f64> = HashMap::new();
        for row in &rows {
            if let Some(previous) = last.get(&row.group) {
                assert!(row.cumulative >= *previous);
            }
            last.insert(row.group.clone(), row.cumulative);
        }
    }

    #[test]
    fn test_idempotent() {
        let input = [(2020, "A", 3.0), (2021, "B", 4.0), (2021, "A", 1.0)];
        assert_eq!(race(&input, 3), race(&input, 3));
    }

    #[test]
    fn test_race_frames_grouping() {
        let frames = RaceFrames::from_rows(race(
            &[(2020, "LeagueA", 100.0), (2020, "LeagueB", 50.0), (2021, "LeagueA", 30.0)],
            2,
        ));

        assert_eq!(frames.len(), 2);
        assert_eq!(frames.get(0).unwrap().time, 2020);
        assert_eq!(frames.get(0).unwrap().entries.len(), 2);
        assert_eq!(frames.get(1).unwrap().entries.len(), 1);
        assert_eq!(frames.max_cumulative(), 130.0);
        assert!((frames.axis_max() - 143.0).abs() < 1e-9);

        let empty: RaceFrames<i32, String> = RaceFrames::from_rows(Vec::new());
        assert!(empty.is_empty());
        assert_eq!(empty.axis_max(), 0.0);
    }
}
