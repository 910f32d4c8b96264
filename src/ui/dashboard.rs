// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine les onglets, la barre de filtres, le contenu de l'onglet actif
// et le footer des raccourcis
//
// CONCEPTS RUST :
// 1. Routing avec match sur enum : un rendu par onglet
// 2. &App : l'UI lit l'état, ne le modifie jamais
// 3. Builder pattern : construction fluide des widgets
//
// CONCEPTS RATATUI :
// 1. Layout : header / filtres / contenu / footer
// 2. Tabs : barre d'onglets
// 3. List + ListState : listes à cocher avec curseur
// ============================================================================

use std::collections::BTreeSet;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, ClubsFocus, RangeSelection, Tab};
use crate::models::{Foot, Position};
use crate::ui::{chart, race_text};

/// Dessine l'interface complète
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);
    render_filters(frame, app, chunks[1]);

    // CONCEPT RUST : Match sur enum pour router
    match app.current_tab {
        Tab::Time => render_time_tab(frame, app, chunks[2]),
        Tab::Leagues => render_leagues_tab(frame, app, chunks[2]),
        Tab::Clubs => render_clubs_tab(frame, app, chunks[2]),
        Tab::Players => render_players_tab(frame, app, chunks[2]),
    }

    render_footer(frame, app, chunks[3]);
}

// ============================================================================
// Layout : Découpage de l'écran
// ============================================================================

/// Crée le layout principal (onglets, filtres, contenu, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Onglets
            Constraint::Length(3), // Filtres
            Constraint::Min(0),    // Contenu
            Constraint::Length(3), // Footer
        ])
        .split(area)
        .to_vec()
}

/// Découpe une zone en deux selon un pourcentage
fn split(area: Rect, direction: Direction, first: u16) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(first), Constraint::Percentage(100 - first)])
        .split(area);
    (chunks[0], chunks[1])
}

// ============================================================================
// Header : Onglets
// ============================================================================

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::ALL.iter().map(|tab| Line::from(tab.title())).collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" ⚽ Football Transfers ({} transferts) ", app.dataset().len())),
        )
        .select(app.current_tab.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider("│");

    frame.render_widget(tabs, area);
}

// ============================================================================
// Barre de filtres
// ============================================================================

fn key_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

fn range_spans(label: &str, range: RangeSelection) -> Vec<Span<'static>> {
    vec![
        Span::raw(format!("{} : ", label)),
        Span::styled(
            format!("{} - {}", range.start, range.end),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" ({}..{})", range.min, range.max),
            Style::default().fg(Color::Gray),
        ),
    ]
}

/// Case à cocher avec la touche associée : "[1]Attacker ✓"
fn toggle_span(key: usize, label: &str, selected: bool) -> Span<'static> {
    let (mark, color) = if selected {
        ("✓", Color::Green)
    } else {
        ("·", Color::DarkGray)
    };
    Span::styled(format!(" [{}]{} {}", key, label, mark), Style::default().fg(color))
}

fn render_filters(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = match app.current_tab {
        Tab::Time => range_spans("Années", app.time_years),
        Tab::Players => range_spans("Années", app.player_years),
        Tab::Leagues => {
            let filters = &app.league_filters;
            let mut spans = range_spans("Âges", filters.ages);
            spans.push(Span::raw("  │"));
            for (i, position) in Position::ALL.iter().enumerate() {
                spans.push(toggle_span(i + 1, position.label(), filters.positions.contains(position)));
            }
            spans.push(Span::raw("  │"));
            for (i, foot) in Foot::ALL.iter().enumerate() {
                spans.push(toggle_span(i + 5, foot.label(), filters.feet.contains(foot)));
            }
            spans
        }
        Tab::Clubs => {
            let filters = &app.club_filters;
            let mut spans = range_spans("Années", filters.years);
            spans.push(Span::raw(format!(
                "  │ {} championnat(s), {} club(s) sélectionné(s)",
                filters.leagues.len(),
                filters.clubs.len()
            )));
            spans
        }
    };

    spans.insert(0, Span::styled("🔎 ", Style::default()));

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Filtres "),
    );

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Onglet Time
// ============================================================================

/// Grille 2x2 : max par année, tendances, âge, pays
fn render_time_tab(frame: &mut Frame, app: &App, area: Rect) {
    let view = &app.views.time;
    let (top, bottom) = split(area, Direction::Vertical, 50);
    let (top_left, top_right) = split(top, Direction::Horizontal, 50);
    let (bottom_left, bottom_right) = split(bottom, Direction::Horizontal, 60);

    chart::render_year_bars(frame, "Max Transfer Fee", &view.max_fee_per_year, top_left);
    chart::render_league_trends(frame, "Top Leagues Spending", &view.league_trends, top_right);
    chart::render_fee_vs_age(frame, "Transfer Fee vs Age", &view.fee_vs_age, bottom_left);
    chart::render_countries(frame, "Fees by Country of Origin", &view.countries, bottom_right);
}

// ============================================================================
// Onglet Leagues
// ============================================================================

fn render_leagues_tab(frame: &mut Frame, app: &App, area: Rect) {
    let view = &app.views.leagues;
    let (left, right) = split(area, Direction::Horizontal, 40);

    chart::render_named_bars(frame, "Total Spending by League", &view.totals, left);
    race_text::render_race(frame, &view.race, app.race_frame, app.race_paused, "League Race", right);
}

// ============================================================================
// Onglet Clubs
// ============================================================================

/// Liste à cocher : "[x] Premier League", curseur en surbrillance
fn render_selection_list(
    frame: &mut Frame,
    title: &str,
    options: &[String],
    selection: &BTreeSet<String>,
    cursor: usize,
    focused: bool,
    area: Rect,
) {
    let border_color = if focused { Color::Yellow } else { Color::Cyan };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ({}/{}) ", title, selection.len(), options.len()));

    if options.is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "Aucune option",
            Style::default().fg(Color::Gray),
        )))
        .block(block)
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = options
        .iter()
        .map(|name| {
            let checked = selection.contains(name);
            let style = if checked {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Gray)
            };
            ListItem::new(format!("[{}] {}", if checked { "x" } else { " " }, name)).style(style)
        })
        .collect();

    let highlight = if focused {
        Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    // CONCEPT RATATUI : ListState
    // - Le widget fait défiler la liste pour garder le curseur visible
    let list = List::new(items).block(block).highlight_style(highlight);
    let mut state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_clubs_tab(frame: &mut Frame, app: &App, area: Rect) {
    let filters = &app.club_filters;
    let view = &app.views.clubs;

    let (lists, charts) = split(area, Direction::Horizontal, 30);
    let (leagues_area, clubs_area) = split(lists, Direction::Vertical, 45);
    let (race_area, bars_area) = split(charts, Direction::Vertical, 60);

    render_selection_list(
        frame,
        "Leagues",
        &app.all_leagues,
        &filters.leagues,
        filters.league_cursor,
        filters.focus == ClubsFocus::Leagues,
        leagues_area,
    );
    render_selection_list(
        frame,
        "Clubs",
        &view.club_options,
        &filters.clubs,
        filters.club_cursor,
        filters.focus == ClubsFocus::Clubs,
        clubs_area,
    );

    race_text::render_race(frame, &view.race, app.race_frame, app.race_paused, "Club Race", race_area);
    chart::render_year_bars(frame, "Fees per Year", &view.fees_per_year, bars_area);
}

// ============================================================================
// Onglet Players
// ============================================================================

fn render_players_tab(frame: &mut Frame, app: &App, area: Rect) {
    let view = &app.views.players;
    let (race_area, bars_area) = split(area, Direction::Horizontal, 60);

    race_text::render_race(frame, &view.race, app.race_frame, app.race_paused, "Player Race", race_area);
    chart::render_foot_medians(frame, "Median Fee by Preferred Foot", &view.foot_medians, bars_area);
}

// ============================================================================
// Footer : Instructions
// ============================================================================

/// Raccourcis propres à l'onglet actif
fn tab_shortcuts(tab: Tab) -> Vec<Span<'static>> {
    let mut spans = vec![
        Span::styled("[[ ]]", key_style()),
        Span::raw(" Début  "),
        Span::styled("[{ }]", key_style()),
        Span::raw(" Fin  "),
    ];

    match tab {
        Tab::Time => {}
        Tab::Leagues => {
            spans.push(Span::styled("[1-4]", key_style()));
            spans.push(Span::raw(" Postes  "));
            spans.push(Span::styled("[5-8]", key_style()));
            spans.push(Span::raw(" Pieds  "));
        }
        Tab::Clubs => {
            spans.push(Span::styled("[↑↓ / j k]", key_style()));
            spans.push(Span::raw(" Naviguer  "));
            spans.push(Span::styled("[Space]", key_style()));
            spans.push(Span::raw(" Cocher  "));
            spans.push(Span::styled("[c]", key_style()));
            spans.push(Span::raw(" Liste  "));
        }
        Tab::Players => {}
    }

    if tab != Tab::Time {
        spans.push(Span::styled("[p]", key_style()));
        spans.push(Span::raw(" Pause  "));
        spans.push(Span::styled("[← →]", key_style()));
        spans.push(Span::raw(" Image  "));
    }

    spans
}

/// Dessine le footer avec les raccourcis clavier
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let shortcuts = if app.is_awaiting_quit_confirmation() {
        // CONCEPT : Style avec BLINK pour attirer l'attention
        Line::from(vec![
            Span::styled(
                "⚠  Appuyez sur ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(
                " à nouveau pour quitter, ou n'importe quelle autre touche pour annuler ⚠",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        let mut spans = vec![
            Span::styled("[q]", key_style()),
            Span::raw(" Quit  "),
            Span::styled("[Tab]", key_style()),
            Span::raw(" Onglet  "),
        ];
        spans.extend(tab_shortcuts(app.current_tab));
        Line::from(spans)
    };

    let paragraph = Paragraph::new(vec![shortcuts])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ratatui::{backend::TestBackend, Terminal};

    use crate::config::Config;
    use crate::models::{Dataset, TransferRecord};

    fn app() -> App {
        let record = |player: &str, club: &str, league: &str, year: i32, fee: f64| TransferRecord {
            player_name: player.to_string(),
            club_from: "Origin".to_string(),
            club_to: club.to_string(),
            league_to: league.to_string(),
            transfer_year: year,
            fee,
            player_age: Some(24),
            position: Some(Position::Defender),
            foot: Foot::Both,
            country: Some("Brazil".to_string()),
        };

        let dataset = Dataset::new(vec![
            record("Neymar", "Paris Saint Germain", "Ligue 1", 2017, 222e6),
            record("Coutinho", "Barcelona", "Laliga", 2018, 135e6),
            record("Fabinho", "Liverpool", "Premier League", 2018, 45e6),
        ]);
        App::new(Arc::new(dataset), &Config::default())
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_every_tab() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();

        for tab in Tab::ALL {
            app.select_tab(tab);
            terminal.draw(|frame| render(frame, &app)).unwrap();
            let text = buffer_text(&terminal);
            assert!(text.contains("Football Transfers"));
        }
    }

    #[test]
    fn test_render_quit_confirmation() {
        let mut app = app();
        app.request_quit();
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
        assert!(buffer_text(&terminal).contains("pour quitter"));
    }

    #[test]
    fn test_tab_shortcuts() {
        let text = |tab| -> String {
            tab_shortcuts(tab).iter().map(|s| s.content.to_string()).collect()
        };
        assert!(!text(Tab::Time).contains("Pause"));
        assert!(text(Tab::Leagues).contains("Postes"));
        assert!(text(Tab::Clubs).contains("Cocher"));
        assert!(text(Tab::Players).contains("Pause"));
    }
}
