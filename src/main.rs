use tuneswipe::cli::{AppConfig, Args};
use tuneswipe::config::UserConfig;
use tuneswipe::domain::{load_profiles, mock_profiles, Deck, DecisionLog, Profile, Resolution};
use tuneswipe::event_loop::{AppEvent, EventPump, TerminalInput};
use tuneswipe::tui::{
    self, handle_key_event, render_help_overlay, render_summary, render_welcome_overlay,
    DragTracker, KeyAction, ViewState,
};
use tuneswipe::{SwipeCardController, SwipeDirection};

use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
        KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let config: AppConfig = args.into();

    if let Some(ref path) = config.log_file {
        init_logging(path)?;
    }

    run_app_with_config(&config).await
}

/// Logs go to a file since stdout belongs to the TUI.
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(filter)
        .init();

    Ok(())
}

/// Runs the TUI application with configuration
pub async fn run_app_with_config(config: &AppConfig) -> io::Result<()> {
    let profiles = match config.profiles {
        Some(ref path) => match load_profiles(path) {
            Ok(profiles) => profiles,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => mock_profiles(),
    };
    info!(count = profiles.len(), "profiles loaded");

    // Load user configuration
    let mut user_config = UserConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load user config: {}", e);
        UserConfig::default()
    });

    let swipe_config = config.swipe_config(user_config.swipe_config());
    if let Err(e) = swipe_config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let (columns, rows) = crossterm::terminal::size()?;
    let viewport_width = tui::deck_viewport_width(Rect::new(0, 0, columns, rows));

    let mut log = DecisionLog::new(profiles.len());
    let mut controller =
        SwipeCardController::new(Deck::new(profiles), swipe_config, viewport_width);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut pump = EventPump::spawn(TerminalInput, config.frame_interval());

    // Main loop
    let result = run_loop(
        &mut terminal,
        &mut controller,
        &mut log,
        &mut pump,
        config,
        &mut user_config,
    )
    .await;

    drop(pump);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Some(ref path) = config.export {
        match log.write_json(path) {
            Ok(()) => println!(
                "Saved {} decisions to {}",
                log.decisions().len(),
                path.display()
            ),
            Err(e) => eprintln!("Failed to export decisions: {}", e),
        }
    }

    let stats = log.get_statistics();
    info!(liked = stats.liked, passed = stats.passed, "session ended");

    result
}

/// Main application loop. Every controller mutation happens here, one event
/// at a time.
async fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    controller: &mut SwipeCardController<Profile>,
    log: &mut DecisionLog,
    pump: &mut EventPump,
    config: &AppConfig,
    user_config: &mut UserConfig,
) -> io::Result<()> {
    // Show welcome on first launch or if --welcome flag is set
    let should_show_welcome = config.show_welcome || !user_config.welcome_shown;
    let mut view_state = if should_show_welcome {
        ViewState::Welcome
    } else {
        ViewState::Browsing
    };

    let mut tracker = DragTracker::new();
    let mut card_area: Option<Rect> = None;
    let mut liked: Vec<String> = Vec::new();

    loop {
        terminal.draw(|frame| {
            card_area = tui::render(frame, controller, &log.get_statistics());

            match view_state {
                ViewState::Help => render_help_overlay(frame),
                ViewState::Summary => render_summary(frame, &log.get_statistics(), &liked),
                ViewState::Welcome => render_welcome_overlay(frame),
                ViewState::Browsing => {}
            }
        })?;

        let Some(event) = pump.next().await else {
            break;
        };

        let input = match event {
            AppEvent::Tick(dt) => {
                if let Some(Resolution::Commit(direction)) = controller.tick(dt, log) {
                    if let Some(record) = log.last() {
                        info!(
                            candidate = record.candidate_id,
                            decision = direction.label(),
                            "decision recorded"
                        );
                    }
                }
                continue;
            }
            AppEvent::InputError(message) => {
                warn!(%message, "terminal input stopped");
                return Err(io::Error::other(message));
            }
            AppEvent::Input(input) => input,
        };

        match input {
            Event::Resize(columns, rows) => {
                let width = tui::deck_viewport_width(Rect::new(0, 0, columns, rows));
                controller.set_viewport_width(width);
            }
            Event::FocusLost => cancel_drag(&mut tracker, controller),
            Event::Mouse(mouse) if view_state == ViewState::Browsing => {
                if let Some(gesture) = tracker.handle_mouse(mouse, card_area) {
                    if !controller.handle(gesture) {
                        debug!(?gesture, "gesture ignored");
                    }
                }
            }
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                // Handle overlay-specific input
                match view_state {
                    ViewState::Help => {
                        let action = handle_key_event(key);
                        if matches!(action, KeyAction::Help | KeyAction::Quit | KeyAction::None) {
                            view_state = ViewState::Browsing;
                        }
                        continue;
                    }
                    ViewState::Summary => {
                        // Any key exits from summary
                        break;
                    }
                    ViewState::Welcome => {
                        view_state = ViewState::Browsing;

                        // Mark welcome as shown and persist
                        user_config.welcome_shown = true;
                        if let Err(e) = user_config.save() {
                            warn!(error = %e, "failed to save user config");
                        }
                        continue;
                    }
                    ViewState::Browsing => {}
                }

                match handle_key_event(key) {
                    KeyAction::Quit => {
                        // Show summary before quitting if any decisions were made
                        if log.is_empty() {
                            break;
                        }
                        cancel_drag(&mut tracker, controller);
                        liked = tui::liked_headlines(
                            controller.deck().candidates(),
                            &log.liked_ids(),
                        );
                        view_state = ViewState::Summary;
                    }
                    KeyAction::Like => swipe(controller, SwipeDirection::Right),
                    KeyAction::Pass => swipe(controller, SwipeDirection::Left),
                    KeyAction::Reset => {
                        tracker.cancel();
                        controller.reset();
                        info!("deck reset");
                    }
                    KeyAction::Help => {
                        cancel_drag(&mut tracker, controller);
                        view_state = ViewState::Help;
                    }
                    KeyAction::None => {}
                }
            }
            _ => {}
        }
    }

    Ok(())
}

fn swipe(controller: &mut SwipeCardController<Profile>, direction: SwipeDirection) {
    if !controller.swipe(direction) {
        debug!(decision = direction.label(), "swipe ignored while card is busy");
    }
}

/// Releases a drag in progress so the card springs back instead of staying
/// stuck under an overlay.
fn cancel_drag(tracker: &mut DragTracker, controller: &mut SwipeCardController<Profile>) {
    if let Some(gesture) = tracker.cancel() {
        controller.handle(gesture);
    }
}
