// TUI module for rendering the discovery screen
pub mod colors;
pub mod helpers;
pub mod input;

// Re-exports
pub use colors::*;
pub use helpers::{calculate_progress, card_rect, centered_rect};
pub use input::{handle_key_event, DragTracker, KeyAction};

use crate::domain::{DecisionStatistics, Profile, SwipeCardController, SwipeDirection};
use helpers::{scale_rect, stamp_strength, tilt_glyph, translate_rect};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

/// UI view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Swiping through the deck
    Browsing,
    /// Help overlay visible
    Help,
    /// Summary screen at end
    Summary,
    /// Welcome screen shown on first launch
    Welcome,
}

/// Splits the screen into header, deck area and footer.
pub fn screen_layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header with progress
            Constraint::Min(0),    // Deck
            Constraint::Length(3), // Footer
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Width of the deck area, which is the viewport the swipe controller
/// measures thresholds against.
pub fn deck_viewport_width(area: Rect) -> f32 {
    screen_layout(area)[1].width as f32
}

/// Renders the discovery screen. Returns where the top card was drawn so
/// mouse presses can be hit-tested against it.
pub fn render(
    frame: &mut Frame,
    controller: &SwipeCardController<Profile>,
    stats: &DecisionStatistics,
) -> Option<Rect> {
    let [header, deck, footer] = screen_layout(frame.area());

    render_header(frame, header, controller, stats);
    let card_area = render_deck(frame, deck, controller);
    render_footer(frame, footer);

    card_area
}

fn render_header(
    frame: &mut Frame,
    area: Rect,
    controller: &SwipeCardController<Profile>,
    stats: &DecisionStatistics,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let deck = controller.deck();
    let title = if controller.is_exhausted() {
        " Discover ".to_string()
    } else {
        format!(" Discover  {}/{} ", deck.current_index() + 1, deck.len())
    };

    let title_line = Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(BRAND_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("♥ {}", stats.liked),
            Style::default().fg(LIKE_COLOR),
        ),
        Span::raw("  "),
        Span::styled(
            format!("✗ {}", stats.passed),
            Style::default().fg(PASS_COLOR),
        ),
    ]);

    let header = Paragraph::new(title_line)
        .block(
            Block::default()
                .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Left);
    frame.render_widget(header, chunks[0]);

    let progress = calculate_progress(deck.current_index(), deck.len());
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM | Borders::LEFT | Borders::RIGHT)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .gauge_style(Style::default().fg(BRAND_PRIMARY).bg(BG_DARK))
        .ratio(progress)
        .label(format!("{}%", (progress * 100.0) as u16));
    frame.render_widget(gauge, chunks[1]);
}

fn render_deck(
    frame: &mut Frame,
    area: Rect,
    controller: &SwipeCardController<Profile>,
) -> Option<Rect> {
    let card_frame = controller.frame();
    if card_frame.exhausted {
        frame.render_widget(exhausted_widget(), centered_rect(70, 60, area));
        return None;
    }

    let base = card_rect(area);

    if let Some(next) = controller.deck().next() {
        let next_area = scale_rect(base, card_frame.next_scale);
        frame.render_widget(next_card_widget(next), next_area);
    }

    let current = controller.deck().current()?;
    let transform = card_frame.transform;
    let placed = translate_rect(base, transform.translate_x, transform.translate_y, area)?;

    let strength = stamp_strength(transform.translate_x, controller.threshold());
    let leaning = if transform.translate_x > 0.0 {
        Some(SwipeDirection::Right)
    } else if transform.translate_x < 0.0 {
        Some(SwipeDirection::Left)
    } else {
        None
    };

    let committing = leaning.is_some() && controller.pending_direction() == leaning;

    frame.render_widget(Clear, placed);
    frame.render_widget(
        current_card_widget(
            current,
            transform.rotation_degrees,
            leaning,
            strength,
            committing,
        ),
        placed,
    );

    Some(placed)
}

fn direction_color(direction: SwipeDirection) -> Color {
    match direction {
        SwipeDirection::Right => LIKE_COLOR,
        SwipeDirection::Left => PASS_COLOR,
    }
}

fn profile_lines(profile: &Profile) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("⌖ ", Style::default().fg(TEXT_SECONDARY)),
            Span::styled(
                format!("{} • {}", profile.location, profile.distance),
                Style::default().fg(TEXT_SECONDARY),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            profile.bio.as_str(),
            Style::default().fg(TEXT_PRIMARY),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "♫ Music Taste",
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let mut genres = Vec::new();
    for genre in &profile.favorite_genres {
        genres.push(Span::styled(
            format!(" {} ", genre),
            Style::default().fg(BG_DARK).bg(GENRE_TAG),
        ));
        genres.push(Span::raw(" "));
    }
    lines.push(Line::from(genres));

    if !profile.favorite_artists.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Favorite Artists: ", Style::default().fg(TEXT_SECONDARY)),
            Span::styled(
                profile.favorite_artists.join(", "),
                Style::default().fg(TEXT_PRIMARY),
            ),
        ]));
    }

    lines
}

fn current_card_widget(
    profile: &Profile,
    rotation_degrees: f32,
    leaning: Option<SwipeDirection>,
    strength: f32,
    committing: bool,
) -> Paragraph<'_> {
    let mut border = Style::default().fg(BRAND_PRIMARY);
    let mut lines = Vec::new();

    match leaning {
        Some(direction) if strength > 0.0 => {
            let color = direction_color(direction);
            border = Style::default().fg(color);

            let stamp = match direction {
                SwipeDirection::Right => " LIKE ",
                SwipeDirection::Left => " NOPE ",
            };
            let mut stamp_style = Style::default().fg(color);
            // Solid once a release here would commit
            if committing {
                stamp_style = Style::default()
                    .fg(BG_DARK)
                    .bg(color)
                    .add_modifier(Modifier::BOLD);
            } else if strength < 0.5 {
                stamp_style = stamp_style.add_modifier(Modifier::DIM);
            }
            let alignment = match direction {
                SwipeDirection::Right => Alignment::Left,
                SwipeDirection::Left => Alignment::Right,
            };
            lines.push(Line::from(Span::styled(stamp, stamp_style)).alignment(alignment));
        }
        _ => lines.push(Line::from("")),
    }

    lines.extend(profile_lines(profile));

    let tilt = format!(
        " {} {:+.0}° ",
        tilt_glyph(rotation_degrees),
        rotation_degrees
    );

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border)
                .title(Span::styled(
                    format!(" {} ", profile.headline()),
                    Style::default()
                        .fg(TEXT_PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ))
                .title(
                    Line::from(Span::styled(tilt, Style::default().fg(TEXT_MUTED)))
                        .alignment(Alignment::Right),
                )
                .style(Style::default().bg(BG_CARD)),
        )
        .wrap(Wrap { trim: true })
}

/// The card underneath is drawn dimmed, like a card seen through the top one.
fn next_card_widget(profile: &Profile) -> Paragraph<'_> {
    Paragraph::new(vec![Line::from(""), Line::from(profile.headline())])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR))
                .style(Style::default().bg(BG_CARD_NEXT)),
        )
        .style(
            Style::default()
                .fg(TEXT_MUTED)
                .add_modifier(Modifier::DIM),
        )
        .alignment(Alignment::Center)
}

/// Creates the view shown once the deck has run out
fn exhausted_widget() -> Paragraph<'static> {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "No more profiles",
            Style::default()
                .fg(BRAND_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "You've seen everyone nearby for now.",
            Style::default().fg(TEXT_SECONDARY),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled(
                "r",
                Style::default()
                    .fg(BRAND_ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" to refresh profiles"),
        ]),
    ];

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR))
                .style(Style::default().bg(BG_CARD)),
        )
        .alignment(Alignment::Center)
}

/// Renders the footer with styled controls
fn render_footer(frame: &mut Frame, area: Rect) {
    let controls = Line::from(vec![
        Span::styled(
            " ← ",
            Style::default()
                .fg(PASS_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Pass", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled(
            "→ ",
            Style::default()
                .fg(LIKE_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Like", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("drag ", Style::default().fg(BRAND_PRIMARY)),
        Span::styled("Swipe", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("? ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Help", Style::default().fg(TEXT_SECONDARY)),
        Span::raw("  │  "),
        Span::styled("q ", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("Quit", Style::default().fg(TEXT_SECONDARY)),
    ]);

    let footer = Paragraph::new(controls)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_COLOR)),
        )
        .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}

/// Headlines of the liked profiles, in the order they were liked.
pub fn liked_headlines(profiles: &[Profile], liked_ids: &[u64]) -> Vec<String> {
    liked_ids
        .iter()
        .filter_map(|id| profiles.iter().find(|profile| profile.id == *id))
        .map(Profile::headline)
        .collect()
}

/// Renders the summary screen at the end
pub fn render_summary(frame: &mut Frame, stats: &DecisionStatistics, liked: &[String]) {
    let summary_area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, summary_area);

    let block = Block::default()
        .title(" Session Complete ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BRAND_PRIMARY))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(summary_area);
    frame.render_widget(block, summary_area);

    let unseen = stats.total_candidates.saturating_sub(stats.decided());

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Summary",
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("   Profiles:  "),
            Span::styled(
                format!("{}", stats.total_candidates),
                Style::default()
                    .fg(BRAND_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("   ♥ ", Style::default().fg(LIKE_COLOR)),
            Span::raw("Liked:   "),
            Span::styled(
                format!("{}", stats.liked),
                Style::default()
                    .fg(LIKE_COLOR)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("   ✗ ", Style::default().fg(PASS_COLOR)),
            Span::raw("Passed:  "),
            Span::styled(
                format!("{}", stats.passed),
                Style::default()
                    .fg(PASS_COLOR)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("   ○ ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Unseen:  "),
            Span::styled(format!("{}", unseen), Style::default().fg(TEXT_SECONDARY)),
        ]),
    ];

    if !liked.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            liked.join(" • "),
            Style::default().fg(LIKE_COLOR),
        )));
    }

    lines.extend([
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to exit",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ]);

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(TEXT_PRIMARY))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, inner);
}

fn shortcut_line<'a>(keys: &'a str, color: Color, description: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", keys), Style::default().fg(color)),
        Span::raw(description),
    ])
}

/// Renders the help overlay
pub fn render_help_overlay(frame: &mut Frame) {
    let help_area = centered_rect(50, 70, frame.area());
    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BRAND_PRIMARY))
        .style(Style::default().bg(BG_DARK));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let help_lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Controls",
            Style::default()
                .fg(BRAND_PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        shortcut_line("→ / l", LIKE_COLOR, "Like"),
        shortcut_line("← / p", PASS_COLOR, "Pass"),
        shortcut_line("drag", BRAND_PRIMARY, "Swipe the card with the mouse"),
        Line::from(""),
        shortcut_line("r", BRAND_ACCENT, "Refresh profiles"),
        shortcut_line("?", TEXT_SECONDARY, "Toggle help"),
        shortcut_line("q / Esc", TEXT_SECONDARY, "Quit"),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or Esc to close",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let paragraph = Paragraph::new(help_lines)
        .alignment(Alignment::Left)
        .style(Style::default().fg(TEXT_PRIMARY));

    frame.render_widget(paragraph, inner);
}

/// Renders the welcome dialog overlay
pub fn render_welcome_overlay(frame: &mut Frame) {
    let area = centered_rect(80, 80, frame.area());
    frame.render_widget(Clear, area);

    let heading = Style::default()
        .fg(BRAND_PRIMARY)
        .add_modifier(Modifier::BOLD);

    let welcome_lines = vec![
        Line::from(""),
        Line::from(Span::styled("Welcome to tuneswipe!", heading)),
        Line::from(""),
        Line::from("Meet people through the music they love, one card at a time."),
        Line::from(""),
        Line::from(Span::styled("How it works:", heading)),
        Line::from(""),
        Line::from(vec![
            Span::styled("  1. ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Grab the card with the mouse and drag it sideways"),
        ]),
        Line::from(vec![
            Span::styled("  2. ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Let go past a quarter of the way to "),
            Span::styled("like", Style::default().fg(LIKE_COLOR)),
            Span::raw(" (right) or "),
            Span::styled("pass", Style::default().fg(PASS_COLOR)),
            Span::raw(" (left)"),
        ]),
        Line::from(vec![
            Span::styled("  3. ", Style::default().fg(TEXT_SECONDARY)),
            Span::raw("Let go earlier and the card springs back"),
        ]),
        Line::from(""),
        Line::from(Span::styled("Keyboard:", heading)),
        Line::from(""),
        shortcut_line("→ / l", LIKE_COLOR, "Like"),
        shortcut_line("← / p", PASS_COLOR, "Pass"),
        shortcut_line("?", TEXT_SECONDARY, "Show help (access this anytime)"),
        shortcut_line("q / Esc", TEXT_SECONDARY, "Quit"),
        Line::from(""),
        Line::from(Span::styled("Press any key to start swiping...", heading)),
    ];

    let welcome_text = Paragraph::new(welcome_lines)
        .block(
            Block::default()
                .title(Span::styled(" Welcome ", heading))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BRAND_PRIMARY))
                .style(Style::default().bg(BG_DARK)),
        )
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    frame.render_widget(welcome_text, area);
}
