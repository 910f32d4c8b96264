// ============================================================================
// Race Chart - Rendu texte des classements animés
// ============================================================================
// Dessine une image du "bar chart race" : une barre horizontale par groupe,
// rang 1 en haut, longueur proportionnelle au cumul
//
// ALGORITHME :
// - Largeur utile = largeur de la zone - colonne des noms - colonne des valeurs
// - Longueur d'une barre = cumul / axe_max * largeur utile
// - Les huitièmes de caractère (▏▎▍▌▋▊▉) donnent une précision sub-caractère
// - La couleur d'un groupe dépend de son nom : elle ne change pas d'une
//   image à l'autre, même si son rang change
// ============================================================================

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::analytics::{choose_scale, format_value, RaceFrame};
use crate::views::Race;

// ============================================================================
// Constantes
// ============================================================================

const FULL_BLOCK: char = '█';

/// Huitièmes de bloc, du plus fin au plus large (index = huitièmes - 1)
const PARTIAL_BLOCKS: [char; 7] = ['▏', '▎', '▍', '▌', '▋', '▊', '▉'];

/// Palette des groupes
const PALETTE: [Color; 8] = [
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Blue,
    Color::Red,
    Color::LightCyan,
    Color::LightGreen,
];

/// Colonne du rang ("10 ")
const RANK_WIDTH: usize = 3;

/// Colonne des valeurs (" 222.00M")
const VALUE_WIDTH: usize = 10;

/// Largeur max de la colonne des noms
const MAX_NAME_WIDTH: usize = 24;

// ============================================================================
// Structure principale
// ============================================================================

/// Renderer d'une image de classement
pub struct RaceRenderer<'a> {
    frame: &'a RaceFrame<i32, String>,
    axis_max: f64,
    name_width: usize,
    bar_width: usize,
}

impl<'a> RaceRenderer<'a> {
    /// Crée un renderer pour une image, dans une zone de largeur `width`
    pub fn new(frame: &'a RaceFrame<i32, String>, axis_max: f64, width: u16) -> Self {
        let longest = frame
            .entries
            .iter()
            .map(|e| e.group.chars().count())
            .max()
            .unwrap_or(0);
        let name_width = longest.min(MAX_NAME_WIDTH);

        // -2 pour les bordures, -2 pour les espaces autour de la barre
        let bar_width = (width as usize)
            .saturating_sub(2 + RANK_WIDTH + name_width + VALUE_WIDTH + 2);

        Self {
            frame,
            axis_max,
            name_width,
            bar_width,
        }
    }

    /// Nombre de huitièmes de caractère pour une valeur
    fn eighths(&self, value: f64) -> usize {
        if self.axis_max <= 0.0 || self.bar_width == 0 {
            return 0;
        }
        let ratio = (value / self.axis_max).clamp(0.0, 1.0);
        (ratio * (self.bar_width * 8) as f64).round() as usize
    }

    /// Construit la barre d'une valeur (blocs pleins + bloc partiel)
    fn bar(&self, value: f64) -> String {
        let eighths = self.eighths(value);
        let mut bar: String = std::iter::repeat(FULL_BLOCK).take(eighths / 8).collect();
        if eighths % 8 > 0 {
            bar.push(PARTIAL_BLOCKS[eighths % 8 - 1]);
        }
        bar
    }

    /// Génère les lignes de l'image, rang 1 en premier
    pub fn render_lines(&self) -> Vec<Line<'a>> {
        self.frame
            .entries
            .iter()
            .map(|entry| {
                let color = group_color(&entry.group);
                let name = truncate(&entry.group, self.name_width);

                Line::from(vec![
                    Span::styled(
                        format!("{:>2} ", entry.rank),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(
                        format!("{:<width$} ", name, width = self.name_width),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(self.bar(entry.cumulative), Style::default().fg(color)),
                    Span::raw(format!(" {}", format_value(entry.cumulative))),
                ])
            })
            .collect()
    }
}

/// Couleur stable d'un groupe (dérivée de son nom)
fn group_color(group: &str) -> Color {
    let hash = group
        .bytes()
        .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
    PALETTE[hash % PALETTE.len()]
}

/// Coupe un nom trop long avec "…"
fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let mut short: String = name.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}

// ============================================================================
// Fonction principale de rendu
// ============================================================================

/// Dessine l'image courante d'un classement animé
pub fn render_race(frame: &mut Frame, race: &Race, index: usize, paused: bool, title: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let race_frame = match race.get(index) {
        Some(race_frame) => race_frame,
        None => {
            let paragraph = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Aucun transfert pour ces filtres",
                    Style::default().fg(Color::Gray),
                )),
            ])
            .block(block.title(format!(" {} ", title)))
            .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        }
    };

    let scale = choose_scale(race.axis_max());
    let state = if paused { "⏸" } else { "▶" };

    let renderer = RaceRenderer::new(race_frame, race.axis_max(), area.width);
    let paragraph = Paragraph::new(renderer.render_lines()).block(block.title(format!(
        " {} {} - {} {} ({}/{}) ",
        state,
        title,
        race_frame.time,
        scale.suffix(),
        index + 1,
        race.len()
    )));

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::RankedFrame;

    fn race_frame() -> RaceFrame<i32, String> {
        RaceFrame {
            time: 2020,
            entries: vec![
                RankedFrame { time: 2020, group: "LeagueA".to_string(), cumulative: 100.0, rank: 1 },
                RankedFrame { time: 2020, group: "LeagueB".to_string(), cumulative: 50.0, rank: 2 },
            ],
        }
    }

    #[test]
    fn test_bar_lengths_are_proportional() {
        let frame = race_frame();
        // largeur 40 : 40 - (2 + 3 + 7 + 10 + 2) = 16 caractères de barre
        let renderer = RaceRenderer::new(&frame, 100.0, 40);
        assert_eq!(renderer.bar_width, 16);
        assert_eq!(renderer.bar(100.0).chars().count(), 16);
        assert_eq!(renderer.bar(50.0).chars().count(), 8);
        assert_eq!(renderer.bar(0.0), "");
    }

    #[test]
    fn test_partial_block() {
        let frame = race_frame();
        let renderer = RaceRenderer::new(&frame, 160.0, 40);
        // 5 / 160 * 128 = 4 huitièmes -> demi-bloc
        assert_eq!(renderer.bar(5.0), "▌");
    }

    #[test]
    fn test_render_lines() {
        let frame = race_frame();
        let lines = RaceRenderer::new(&frame, 110.0, 60).render_lines();
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_narrow_area_has_no_bar() {
        let frame = race_frame();
        let renderer = RaceRenderer::new(&frame, 100.0, 10);
        assert_eq!(renderer.bar(100.0), "");
    }

    #[test]
    fn test_group_color_is_stable() {
        assert_eq!(group_color("Premier League"), group_color("Premier League"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Arsenal", 10), "Arsenal");
        assert_eq!(truncate("Borussia Mönchengladbach", 8), "Borussi…");
    }
}
