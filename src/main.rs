// ============================================================================
// Footdash - Tableau de bord des transferts de football
// ============================================================================
// Programme TUI : charge le CSV des transferts puis affiche quatre onglets
// (Time, Leagues, Clubs, Players) avec filtres et classements animés
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle infinie qui gère événements et rendering
// 3. Arc<Dataset> : données chargées une fois, partagées en lecture
// 4. Restauration du terminal même si la boucle échoue
// ============================================================================

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use footdash::app::{App, Tab};
use footdash::config::Config;
use footdash::data::load_dataset;
use footdash::models::{Foot, Position};
use footdash::ui::{events::EventHandler, render};

// ============================================================================
// Logging
// ============================================================================

/// Initialise le logging dans un fichier avec rotation quotidienne
///
/// CONCEPT : Logs dans un fichier
/// - Le terminal est occupé par la TUI, impossible d'y écrire
/// - RUST_LOG remplace le filtre par défaut
fn init_logging(config: &Config) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = config.log_dir.clone();

    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    // Rotation::DAILY : footdash.log.2024-01-15
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "footdash.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "footdash=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée
// ============================================================================

fn main() -> Result<()> {
    let config = Config::from_env();

    // Si init échoue, on affiche l'erreur et continue quand même
    init_logging(&config).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(?config, "Footdash starting up");
    println!("📊 Chargement de {}...", config.data_path.display());

    let dataset = load_dataset(&config.data_path).with_context(|| {
        format!(
            "Impossible de charger les transferts depuis {}",
            config.data_path.display()
        )
    })?;

    println!("✅ {} transferts chargés !\n", dataset.len());

    let app = App::new(Arc::new(dataset), &config);

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;
    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, app, &events);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event loop
// ============================================================================
// CONCEPT : Game loop pattern
// 1. RENDER : dessine l'état courant
// 2. INPUT : attend un événement (max 250ms)
// 3. UPDATE : tick de l'animation
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    events: &EventHandler,
) -> Result<()> {
    while app.is_running() {
        terminal.draw(|frame| render(frame, &app))?;

        match events.next()? {
            footdash::ui::Event::Tick => app.tick(),
            event => handle_event(&mut app, event),
        }
    }

    Ok(())
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement clavier et met à jour l'état de l'application
///
/// CONCEPT RUST : Pattern matching avec guards
/// - Les guards (if) choisissent l'action selon la touche et l'onglet
/// - Toute touche autre que 'q' annule une demande de quit
fn handle_event(app: &mut App, event: footdash::ui::events::Event) {
    use footdash::ui::events::{
        get_char_from_event, is_down_event, is_left_event, is_next_tab_event,
        is_previous_tab_event, is_quit_event, is_right_event, is_space_event, is_up_event, Event,
    };

    if matches!(event, Event::Key(_)) && !is_quit_event(&event) {
        app.cancel_quit();
    }

    match event {
        Event::Key(_) if is_quit_event(&event) => {
            // Two-step : première pression -> confirmation, deuxième -> quit
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        Event::Key(_) if is_next_tab_event(&event) => {
            app.next_tab();
            debug!(tab = app.current_tab.title(), "User switched tab");
        }
        Event::Key(_) if is_previous_tab_event(&event) => {
            app.previous_tab();
            debug!(tab = app.current_tab.title(), "User switched tab");
        }

        // Animation (onglets avec classement)
        Event::Key(_) if is_left_event(&event) => app.step_race(-1),
        Event::Key(_) if is_right_event(&event) => app.step_race(1),

        // Listes de l'onglet Clubs
        Event::Key(_) if is_up_event(&event) && app.current_tab == Tab::Clubs => app.move_cursor(-1),
        Event::Key(_) if is_down_event(&event) && app.current_tab == Tab::Clubs => app.move_cursor(1),
        Event::Key(_) if is_space_event(&event) && app.current_tab == Tab::Clubs => app.toggle_selected(),

        Event::Key(_) => {
            if let Some(c) = get_char_from_event(&event) {
                handle_char(app, c);
            }
        }

        Event::Tick => app.tick(),
    }
}

/// Raccourcis à un caractère
fn handle_char(app: &mut App, c: char) {
    match c {
        // Plage active (années, ou âges sur l'onglet Leagues)
        '[' => app.shift_range_start(-1),
        ']' => app.shift_range_start(1),
        '{' => app.shift_range_end(-1),
        '}' => app.shift_range_end(1),

        'p' | 'P' if app.active_race().is_some() => app.toggle_race_pause(),

        'c' | 'C' if app.current_tab == Tab::Clubs => app.switch_clubs_focus(),

        '1'..='4' if app.current_tab == Tab::Leagues => {
            let index = c as usize - '1' as usize;
            app.toggle_position(Position::ALL[index]);
        }
        '5'..='8' if app.current_tab == Tab::Leagues => {
            let index = c as usize - '5' as usize;
            app.toggle_foot(Foot::ALL[index]);
        }

        _ => {}
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================

/// Configure le terminal en mode TUI
///
/// CONCEPT : Raw mode + Alternate screen
/// - Raw mode : pas d'écho, pas de buffering ligne par ligne
/// - Alternate screen : l'écran précédent est restauré en sortie
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal dans son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    terminal.show_cursor()?;

    Ok(())
}
