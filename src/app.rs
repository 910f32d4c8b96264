// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Arc<Dataset> : la table est partagée en lecture seule
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// - Chaque changement de filtre recalcule la vue de l'onglet actif
// ============================================================================

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{self, Config};
use crate::models::{Dataset, Foot, Position, TransferFilter};
use crate::views::{ClubsView, LeaguesView, PlayersView, Race, TimeView};

// ============================================================================
// Enum : Tab
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Un seul onglet actif à la fois
// - Le compilateur force à gérer tous les cas (exhaustivité)
// ============================================================================

/// Onglets du tableau de bord
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Analyse dans le temps (plage d'années)
    Time,
    /// Championnats (âge, postes, pieds)
    Leagues,
    /// Clubs (années, championnats, clubs)
    Clubs,
    /// Joueurs (plage d'années)
    Players,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Time, Tab::Leagues, Tab::Clubs, Tab::Players];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Time => "Time Based",
            Tab::Leagues => "Leagues",
            Tab::Clubs => "Clubs",
            Tab::Players => "Players",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Time => 0,
            Tab::Leagues => 1,
            Tab::Clubs => 2,
            Tab::Players => 3,
        }
    }

    /// Onglet suivant (boucle : Players -> Time)
    pub fn next(&self) -> Self {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    /// Onglet précédent (boucle : Time -> Players)
    pub fn previous(&self) -> Self {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Liste qui a le focus dans l'onglet Clubs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClubsFocus {
    Leagues,
    Clubs,
}

// ============================================================================
// Structure : RangeSelection
// ============================================================================
// Équivalent d'un "range slider" : deux bornes incluses dans [min, max]
// ============================================================================

/// Plage sélectionnée, toujours contenue dans ses bornes avec start <= end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSelection {
    pub start: i32,
    pub end: i32,
    pub min: i32,
    pub max: i32,
}

impl RangeSelection {
    /// Crée une sélection, les valeurs sont ramenées dans les bornes
    pub fn new(start: i32, end: i32, min: i32, max: i32) -> Self {
        let start = start.clamp(min, max);
        let end = end.clamp(start, max);
        Self { start, end, min, max }
    }

    /// Déplace la borne basse sans dépasser la borne haute
    pub fn shift_start(&mut self, delta: i32) {
        self.start = (self.start + delta).clamp(self.min, self.end);
    }

    /// Déplace la borne haute sans passer sous la borne basse
    pub fn shift_end(&mut self, delta: i32) {
        self.end = (self.end + delta).clamp(self.start, self.max);
    }

    pub fn as_range(&self) -> std::ops::RangeInclusive<i32> {
        self.start..=self.end
    }
}

// ============================================================================
// Filtres par onglet
// ============================================================================

/// Filtres de l'onglet Leagues
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueFilters {
    pub ages: RangeSelection,
    pub positions: BTreeSet<Position>,
    pub feet: BTreeSet<Foot>,
}

/// Filtres de l'onglet Clubs
#[derive(Debug, Clone, PartialEq)]
pub struct ClubFilters {
    pub years: RangeSelection,
    pub leagues: BTreeSet<String>,
    pub clubs: BTreeSet<String>,
    pub focus: ClubsFocus,
    /// Position du curseur dans la liste des championnats
    pub league_cursor: usize,
    /// Position du curseur dans la liste des clubs
    pub club_cursor: usize,
}

/// Vues calculées, une par onglet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Views {
    pub time: TimeView,
    pub leagues: LeaguesView,
    pub clubs: ClubsView,
    pub players: PlayersView,
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Two-step quit : première pression de 'q' -> true
    pub confirm_quit: bool,

    /// Onglet affiché
    pub current_tab: Tab,

    /// Table des transferts (lecture seule, partagée)
    dataset: Arc<Dataset>,

    /// Tous les championnats, triés (options de l'onglet Clubs)
    pub all_leagues: Vec<String>,

    /// Plage d'années de l'onglet Time
    pub time_years: RangeSelection,

    pub league_filters: LeagueFilters,

    pub club_filters: ClubFilters,

    /// Plage d'années de l'onglet Players
    pub player_years: RangeSelection,

    pub views: Views,

    /// Image courante de l'animation de classement
    pub race_frame: usize,

    /// Animation en pause
    pub race_paused: bool,

    /// Ticks écoulés depuis la dernière image
    ticks: u32,

    race_ticks_per_frame: u32,
}

impl App {
    /// Crée l'application et calcule toutes les vues
    ///
    /// Valeurs par défaut : années [2014, max], âges [18, 30], tous les
    /// postes et pieds, les trois premiers championnats.
    pub fn new(dataset: Arc<Dataset>, config: &Config) -> Self {
        let (min_year, max_year) = dataset.year_bounds().unwrap_or((config::DEFAULT_START_YEAR, config::DEFAULT_START_YEAR));
        let (min_age, max_age) = dataset.age_bounds().unwrap_or(config::DEFAULT_AGE_RANGE);
        let all_leagues = dataset.leagues();

        let years = RangeSelection::new(config::DEFAULT_START_YEAR, max_year, min_year, max_year);
        let (default_min_age, default_max_age) = config::DEFAULT_AGE_RANGE;

        let mut app = Self {
            running: true,
            confirm_quit: false,
            current_tab: Tab::Time,
            all_leagues: all_leagues.clone(),
            time_years: years,
            league_filters: LeagueFilters {
                ages: RangeSelection::new(default_min_age, default_max_age, min_age, max_age),
                positions: Position::ALL.into_iter().collect(),
                feet: Foot::ALL.into_iter().collect(),
            },
            club_filters: ClubFilters {
                years,
                leagues: all_leagues
                    .into_iter()
                    .take(config::DEFAULT_LEAGUE_SELECTION)
                    .collect(),
                clubs: BTreeSet::new(),
                focus: ClubsFocus::Leagues,
                league_cursor: 0,
                club_cursor: 0,
            },
            player_years: years,
            dataset,
            views: Views::default(),
            race_frame: 0,
            race_paused: false,
            ticks: 0,
            race_ticks_per_frame: config.race_ticks_per_frame.max(1),
        };

        for tab in Tab::ALL {
            app.refresh(tab);
        }

        app
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Vérifie si l'application doit continuer
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    // ========================================================================
    // Navigation entre onglets
    // ========================================================================

    pub fn next_tab(&mut self) {
        self.select_tab(self.current_tab.next());
    }

    pub fn previous_tab(&mut self) {
        self.select_tab(self.current_tab.previous());
    }

    /// Change d'onglet ; l'animation repart de la première image
    pub fn select_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
        self.restart_race();
    }

    // ========================================================================
    // Filtres -> TransferFilter
    // ========================================================================
    // CONCEPT : État de filtre explicite
    // - Chaque onglet traduit son état en TransferFilter
    // - Les requêtes ne connaissent que TransferFilter
    // ========================================================================

    pub fn time_filter(&self) -> TransferFilter {
        TransferFilter::new().years(self.time_years.as_range())
    }

    pub fn leagues_filter(&self) -> TransferFilter {
        TransferFilter::new()
            .ages(self.league_filters.ages.as_range())
            .positions(self.league_filters.positions.iter().copied())
            .feet(self.league_filters.feet.iter().copied())
    }

    /// Filtre du classement des clubs (sans la sélection de clubs)
    pub fn clubs_race_filter(&self) -> TransferFilter {
        TransferFilter::new()
            .years(self.club_filters.years.as_range())
            .leagues(self.club_filters.leagues.iter().cloned())
    }

    /// Filtre du graphique annuel (avec la sélection de clubs)
    pub fn clubs_bar_filter(&self) -> TransferFilter {
        self.clubs_race_filter()
            .clubs(self.club_filters.clubs.iter().cloned())
    }

    pub fn players_filter(&self) -> TransferFilter {
        TransferFilter::new().years(self.player_years.as_range())
    }

    /// Recalcule la vue d'un onglet à partir de ses filtres
    pub fn refresh(&mut self, tab: Tab) {
        let dataset = Arc::clone(&self.dataset);

        match tab {
            Tab::Time => {
                self.views.time = TimeView::compute(&dataset, &self.time_filter());
            }
            Tab::Leagues => {
                self.views.leagues = LeaguesView::compute(&dataset, &self.leagues_filter());
            }
            Tab::Clubs => {
                self.views.clubs = ClubsView::compute(
                    &dataset,
                    &self.clubs_race_filter(),
                    &self.clubs_bar_filter(),
                    &self.club_filters.leagues,
                );

                // Les clubs sélectionnés doivent rester parmi les options
                let options: BTreeSet<&String> = self.views.clubs.club_options.iter().collect();
                self.club_filters.clubs.retain(|club| options.contains(club));
                let len = self.views.clubs.club_options.len();
                self.club_filters.club_cursor = self.club_filters.club_cursor.min(len.saturating_sub(1));
            }
            Tab::Players => {
                self.views.players = PlayersView::compute(&dataset, &self.players_filter());
            }
        }

        debug!(tab = tab.title(), "View refreshed");
        if tab == self.current_tab {
            self.restart_race();
        }
    }

    fn refresh_current(&mut self) {
        self.refresh(self.current_tab);
    }

    // ========================================================================
    // Plages (années ou âges selon l'onglet)
    // ========================================================================

    /// Plage modifiable de l'onglet actif
    ///
    /// CONCEPT RUST : Retourner une référence mutable
    /// - &mut RangeSelection pointe dans self
    /// - Le borrow checker interdit tout autre accès à self pendant ce temps
    fn active_range_mut(&mut self) -> &mut RangeSelection {
        match self.current_tab {
            Tab::Time => &mut self.time_years,
            Tab::Leagues => &mut self.league_filters.ages,
            Tab::Clubs => &mut self.club_filters.years,
            Tab::Players => &mut self.player_years,
        }
    }

    /// Plage de l'onglet actif (lecture)
    pub fn active_range(&self) -> RangeSelection {
        match self.current_tab {
            Tab::Time => self.time_years,
            Tab::Leagues => self.league_filters.ages,
            Tab::Clubs => self.club_filters.years,
            Tab::Players => self.player_years,
        }
    }

    pub fn shift_range_start(&mut self, delta: i32) {
        let range = self.active_range_mut();
        let before = *range;
        range.shift_start(delta);
        if *range != before {
            self.refresh_current();
        }
    }

    pub fn shift_range_end(&mut self, delta: i32) {
        let range = self.active_range_mut();
        let before = *range;
        range.shift_end(delta);
        if *range != before {
            self.refresh_current();
        }
    }

    // ========================================================================
    // Onglet Leagues : postes et pieds
    // ========================================================================

    /// Ajoute ou retire un poste (onglet Leagues)
    pub fn toggle_position(&mut self, position: Position) {
        if !self.league_filters.positions.remove(&position) {
            self.league_filters.positions.insert(position);
        }
        info!(position = %position, selected = self.league_filters.positions.len(), "Position filter toggled");
        self.refresh(Tab::Leagues);
    }

    /// Ajoute ou retire un pied préféré (onglet Leagues)
    pub fn toggle_foot(&mut self, foot: Foot) {
        if !self.league_filters.feet.remove(&foot) {
            self.league_filters.feet.insert(foot);
        }
        info!(foot = %foot, selected = self.league_filters.feet.len(), "Foot filter toggled");
        self.refresh(Tab::Leagues);
    }

    // ========================================================================
    // Onglet Clubs : listes de championnats et de clubs
    // ========================================================================

    pub fn switch_clubs_focus(&mut self) {
        self.club_filters.focus = match self.club_filters.focus {
            ClubsFocus::Leagues => ClubsFocus::Clubs,
            ClubsFocus::Clubs => ClubsFocus::Leagues,
        };
    }

    /// Déplace le curseur de la liste qui a le focus
    ///
    /// CONCEPT RUST : saturating_sub / min
    /// - Évite les panics avec les unsigned (liste vide incluse)
    pub fn move_cursor(&mut self, delta: i32) {
        let (cursor, len) = match self.club_filters.focus {
            ClubsFocus::Leagues => (&mut self.club_filters.league_cursor, self.all_leagues.len()),
            ClubsFocus::Clubs => (&mut self.club_filters.club_cursor, self.views.clubs.club_options.len()),
        };

        let max_index = len.saturating_sub(1);
        *cursor = if delta < 0 {
            cursor.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (*cursor + delta as usize).min(max_index)
        };
    }

    /// Coche ou décoche l'élément sous le curseur
    pub fn toggle_selected(&mut self) {
        let (selection, options, cursor) = match self.club_filters.focus {
            ClubsFocus::Leagues => (
                &mut self.club_filters.leagues,
                &self.all_leagues,
                self.club_filters.league_cursor,
            ),
            ClubsFocus::Clubs => (
                &mut self.club_filters.clubs,
                &self.views.clubs.club_options,
                self.club_filters.club_cursor,
            ),
        };

        if let Some(name) = options.get(cursor) {
            if !selection.remove(name) {
                selection.insert(name.clone());
            }
            info!(name = %name, selected = selection.len(), "Clubs tab selection toggled");
            self.refresh(Tab::Clubs);
        }
    }

    // ========================================================================
    // Animation du classement
    // ========================================================================

    /// Classement animé de l'onglet actif (None pour l'onglet Time)
    pub fn active_race(&self) -> Option<&Race> {
        match self.current_tab {
            Tab::Time => None,
            Tab::Leagues => Some(&self.views.leagues.race),
            Tab::Clubs => Some(&self.views.clubs.race),
            Tab::Players => Some(&self.views.players.race),
        }
    }

    fn race_len(&self) -> usize {
        self.active_race().map(|race| race.len()).unwrap_or(0)
    }

    pub fn restart_race(&mut self) {
        self.race_frame = 0;
        self.ticks = 0;
    }

    pub fn toggle_race_pause(&mut self) {
        self.race_paused = !self.race_paused;
        info!(paused = self.race_paused, "Race animation toggled");
    }

    /// Avance (ou recule) d'une image, en boucle
    pub fn step_race(&mut self, delta: i32) {
        let len = self.race_len();
        if len == 0 {
            self.race_frame = 0;
            return;
        }

        let len = len as i64;
        let next = (self.race_frame as i64 + delta as i64).rem_euclid(len);
        self.race_frame = next as usize;
        self.ticks = 0;
    }

    /// Tick : appelé à chaque itération de la boucle
    ///
    /// CONCEPT : Event Loop Pattern
    /// - tick() est appelé régulièrement (chaque frame)
    /// - Fait avancer l'animation toutes les `race_ticks_per_frame` itérations
    pub fn tick(&mut self) {
        if self.race_paused || self.race_len() == 0 {
            return;
        }

        self.ticks += 1;
        if self.ticks >= self.race_ticks_per_frame {
            self.step_race(1);
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
