//! Color palette for the discovery screen.

use ratatui::style::Color;

// Backgrounds
pub const BG_DARK: Color = Color::Rgb(18, 18, 18);
pub const BG_CARD: Color = Color::Rgb(30, 30, 30);
pub const BG_CARD_NEXT: Color = Color::Rgb(24, 24, 24);

// Text
pub const TEXT_PRIMARY: Color = Color::Rgb(255, 255, 255);
pub const TEXT_SECONDARY: Color = Color::Rgb(176, 176, 176);
pub const TEXT_MUTED: Color = Color::Rgb(110, 110, 110);

// Brand
pub const BRAND_PRIMARY: Color = Color::Rgb(186, 104, 200);
pub const BRAND_ACCENT: Color = Color::Rgb(233, 30, 99);

// Decisions
pub const LIKE_COLOR: Color = Color::Rgb(16, 185, 129);
pub const PASS_COLOR: Color = Color::Rgb(244, 63, 94);

pub const BORDER_COLOR: Color = Color::Rgb(66, 66, 66);
pub const GENRE_TAG: Color = Color::Rgb(96, 165, 250);
