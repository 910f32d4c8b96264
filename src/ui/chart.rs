// ============================================================================
// Chart - Graphiques des onglets
// ============================================================================
// Histogrammes, courbes et nuage de points à partir des vues calculées
//
// CONCEPTS RUST :
// 1. Slices : les fonctions reçoivent &[T], jamais la vue entière
// 2. Iterator chaining : transformer les lignes en points (x, y)
// 3. Lifetimes : les Dataset ratatui empruntent des Vec locaux
//
// CONCEPTS RATATUI :
// 1. BarChart + Bar : histogrammes (verticaux ou horizontaux)
// 2. Chart + Dataset + Axis : courbes et nuage de points
// 3. Toutes les valeurs affichées passent par l'échelle K/M/B
// ============================================================================

use std::collections::BTreeMap;

use ratatui::{
    layout::{Alignment, Direction, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, List, ListItem,
        Paragraph,
    },
    Frame,
};

use crate::analytics::queries::{AgePoint, FootMedian, LeagueYearValue, NamedTotal, YearValue};
use crate::analytics::{choose_scale, choose_scale_for, format_value, ScaleChoice};
use crate::models::Position;

/// Couleurs des séries (courbes des championnats)
const SERIES_COLORS: [Color; 5] = [
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::LightRed,
];

/// Nombre de pays affichés dans le classement
const TOP_COUNTRIES: usize = 15;

fn chart_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(title)
}

/// Titre avec le suffixe d'échelle : " Max Fee (M) "
fn scaled_title(title: &str, scale: ScaleChoice) -> String {
    if scale.suffix().is_empty() {
        format!(" {} ", title)
    } else {
        format!(" {} {} ", title, scale.suffix())
    }
}

/// Hauteur d'une barre : les BarChart n'acceptent que des u64
fn bar_height(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

// ============================================================================
// Histogrammes
// ============================================================================

/// Histogramme vertical d'une valeur par année
pub fn render_year_bars(frame: &mut Frame, title: &str, values: &[YearValue], area: Rect) {
    if values.is_empty() {
        render_no_data(frame, area, title, "Aucun transfert payant pour ces filtres");
        return;
    }

    let scale = choose_scale_for(values.iter().map(|v| v.value));

    let bars: Vec<Bar> = values
        .iter()
        .map(|v| {
            Bar::default()
                .value(bar_height(v.value))
                .label(Line::from(v.year.to_string()))
                .text_value(format_value(v.value))
                .style(Style::default().fg(Color::Cyan))
        })
        .collect();

    // 4 colonnes par barre minimum : "2019"
    let available = area.width.saturating_sub(2) as usize;
    let bar_width = (available / values.len().max(1)).saturating_sub(1).clamp(4, 9) as u16;

    let chart = BarChart::default()
        .block(chart_block(scaled_title(title, scale)))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));

    frame.render_widget(chart, area);
}

/// Histogramme horizontal de totaux nommés (championnats)
pub fn render_named_bars(frame: &mut Frame, title: &str, totals: &[NamedTotal], area: Rect) {
    if totals.is_empty() {
        render_no_data(frame, area, title, "Aucun transfert payant pour ces filtres");
        return;
    }

    let scale = choose_scale_for(totals.iter().map(|t| t.value));

    let bars: Vec<Bar> = totals
        .iter()
        .map(|t| {
            Bar::default()
                .value(bar_height(t.value))
                .label(Line::from(t.name.clone()))
                .text_value(format_value(t.value))
                .style(Style::default().fg(Color::Green))
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block(scaled_title(title, scale)))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(0)
        .value_style(Style::default().fg(Color::Black).bg(Color::Green));

    frame.render_widget(chart, area);
}

/// Histogramme des médianes par pied préféré
pub fn render_foot_medians(frame: &mut Frame, title: &str, medians: &[FootMedian], area: Rect) {
    if medians.is_empty() {
        render_no_data(frame, area, title, "Aucun transfert payant pour ces années");
        return;
    }

    let scale = choose_scale_for(medians.iter().map(|m| m.median));

    let bars: Vec<Bar> = medians
        .iter()
        .map(|m| {
            Bar::default()
                .value(bar_height(m.median))
                .label(Line::from(m.foot.label()))
                .text_value(format_value(m.median))
                .style(Style::default().fg(Color::Magenta))
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block(scaled_title(title, scale)))
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(2)
        .value_style(Style::default().fg(Color::Black).bg(Color::Magenta));

    frame.render_widget(chart, area);
}

// ============================================================================
// Courbes : tendance des championnats
// ============================================================================

/// Une courbe par championnat, valeurs dans l'échelle choisie
fn trend_series(trends: &[LeagueYearValue], scale: ScaleChoice) -> BTreeMap<&str, Vec<(f64, f64)>> {
    let mut series: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();
    for row in trends {
        series
            .entry(row.league.as_str())
            .or_default()
            .push((row.year as f64, scale.apply(row.value)));
    }
    series
}

/// Courbes des dépenses par année des principaux championnats
pub fn render_league_trends(frame: &mut Frame, title: &str, trends: &[LeagueYearValue], area: Rect) {
    if trends.is_empty() {
        render_no_data(frame, area, title, "Aucun transfert payant pour ces années");
        return;
    }

    let scale = choose_scale_for(trends.iter().map(|t| t.value));
    let series = trend_series(trends, scale);

    // CONCEPT RUST : fold pour min/max en une passe
    let (min_year, max_year) = trends
        .iter()
        .fold((i32::MAX, i32::MIN), |(lo, hi), t| (lo.min(t.year), hi.max(t.year)));
    let y_max = series
        .values()
        .flatten()
        .fold(0.0_f64, |acc, &(_, y)| acc.max(y))
        * 1.05;

    let datasets: Vec<Dataset> = series
        .iter()
        .enumerate()
        .map(|(i, (league, points))| {
            Dataset::default()
                .name(*league)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(SERIES_COLORS[i % SERIES_COLORS.len()]))
                .data(points)
        })
        .collect();

    let x_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([min_year as f64, max_year.max(min_year + 1) as f64])
        .labels(vec![
            Span::raw(min_year.to_string()),
            Span::raw(max_year.to_string()),
        ]);

    let y_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, y_max.max(1.0)])
        .labels(vec![
            Span::raw("0"),
            Span::raw(format!("{:.0}", y_max / 2.0)),
            Span::raw(format!("{:.0}", y_max)),
        ]);

    let chart = Chart::new(datasets)
        .block(chart_block(scaled_title(title, scale)))
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

// ============================================================================
// Nuage de points : montant vs âge
// ============================================================================

fn position_color(position: Option<Position>) -> Color {
    match position {
        Some(Position::Attacker) => Color::Red,
        Some(Position::Midfielder) => Color::Yellow,
        Some(Position::Defender) => Color::Cyan,
        Some(Position::Goalkeeper) => Color::Green,
        None => Color::Gray,
    }
}

/// Points groupés par poste (une série colorée par poste)
fn age_series(points: &[AgePoint], scale: ScaleChoice) -> Vec<(Option<Position>, Vec<(f64, f64)>)> {
    let mut series: Vec<(Option<Position>, Vec<(f64, f64)>)> = Vec::new();
    for point in points {
        let xy = (point.age as f64, scale.apply(point.fee));
        match series.iter_mut().find(|(position, _)| *position == point.position) {
            Some((_, data)) => data.push(xy),
            None => series.push((point.position, vec![xy])),
        }
    }
    series
}

/// Nuage de points âge / montant, une couleur par poste
pub fn render_fee_vs_age(frame: &mut Frame, title: &str, points: &[AgePoint], area: Rect) {
    if points.is_empty() {
        render_no_data(frame, area, title, "Aucun transfert avec un âge connu");
        return;
    }

    let max_fee = points.iter().fold(0.0_f64, |acc, p| acc.max(p.fee));
    let scale = choose_scale(max_fee);
    let series = age_series(points, scale);

    let (min_age, max_age) = points
        .iter()
        .fold((i32::MAX, i32::MIN), |(lo, hi), p| (lo.min(p.age), hi.max(p.age)));
    let y_max = scale.apply(max_fee).max(1.0) * 1.05;

    let datasets: Vec<Dataset> = series
        .iter()
        .map(|(position, data)| {
            let name = position.map(|p| p.label()).unwrap_or("Unknown");
            Dataset::default()
                .name(name)
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(position_color(*position)))
                .data(data)
        })
        .collect();

    let x_axis = Axis::default()
        .title("Âge")
        .style(Style::default().fg(Color::Gray))
        .bounds([min_age as f64, max_age.max(min_age + 1) as f64])
        .labels(vec![
            Span::raw(min_age.to_string()),
            Span::raw(max_age.to_string()),
        ]);

    let y_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, y_max])
        .labels(vec![
            Span::raw("0"),
            Span::raw(format!("{:.0}", y_max / 2.0)),
            Span::raw(format!("{:.0}", y_max)),
        ]);

    let chart = Chart::new(datasets)
        .block(chart_block(scaled_title(title, scale)))
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

// ============================================================================
// Pays d'origine
// ============================================================================

/// Classement des pays d'origine (remplace la carte du monde)
///
/// Les pays sans dépense restent dans la vue mais ne sont pas listés.
pub fn render_countries(frame: &mut Frame, title: &str, countries: &[NamedTotal], area: Rect) {
    let mut ranked: Vec<&NamedTotal> = countries.iter().filter(|c| c.value > 0.0).collect();
    if ranked.is_empty() {
        render_no_data(frame, area, title, "Aucun pays d'origine connu");
        return;
    }

    ranked.sort_by(|a, b| b.value.total_cmp(&a.value));
    let total = ranked.len();

    let items: Vec<ListItem> = ranked
        .into_iter()
        .take(TOP_COUNTRIES)
        .enumerate()
        .map(|(i, country)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{:<24}", country.name),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{:>10}", format_value(country.value))),
            ]))
        })
        .collect();

    let list = List::new(items).block(chart_block(format!(" {} ({} pays) ", title, total)));
    frame.render_widget(list, area);
}

// ============================================================================
// Helper : Message quand pas de données
// ============================================================================

/// Affiche un message à la place d'un graphique vide
pub fn render_no_data(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Gray))),
    ];

    let paragraph = Paragraph::new(text)
        .block(chart_block(format!(" {} ", title)))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_height() {
        assert_eq!(bar_height(1_500_000.4), 1_500_000);
        assert_eq!(bar_height(-3.0), 0);
        assert_eq!(bar_height(f64::NAN), 0);
    }

    #[test]
    fn test_scaled_title() {
        assert_eq!(scaled_title("Max Fee", ScaleChoice::Million), " Max Fee (M) ");
        assert_eq!(scaled_title("Max Fee", ScaleChoice::Raw), " Max Fee ");
    }

    #[test]
    fn test_trend_series_groups_by_league() {
        let row = |year: i32, league: &str, value: f64| LeagueYearValue {
            year,
            league: league.to_string(),
            value,
        };
        let trends = vec![
            row(2019, "Laliga", 2e6),
            row(2019, "Serie A", 1e6),
            row(2020, "Laliga", 3e6),
        ];

        let series = trend_series(&trends, ScaleChoice::Million);
        assert_eq!(series.len(), 2);
        assert_eq!(series["Laliga"], vec![(2019.0, 2.0), (2020.0, 3.0)]);
    }

    #[test]
    fn test_age_series_groups_by_position() {
        let point = |age: i32, fee: f64, position: Option<Position>| AgePoint {
            age,
            fee,
            year: 2020,
            player_name: "X".to_string(),
            club_from: "A".to_string(),
            club_to: "B".to_string(),
            position,
        };
        let points = vec![
            point(20, 1000.0, Some(Position::Attacker)),
            point(25, 2000.0, None),
            point(30, 3000.0, Some(Position::Attacker)),
        ];

        let series = age_series(&points, ScaleChoice::Thousand);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].1, vec![(20.0, 1.0), (30.0, 3.0)]);
        assert_eq!(series[1].0, None);
    }
}
