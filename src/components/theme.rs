use ratatui::style::Color;

pub const BG_BASE: Color = Color::Rgb(16, 18, 24);
pub const BG_PANEL: Color = Color::Rgb(28, 30, 40);
pub const BG_HIGHLIGHT: Color = Color::Rgb(52, 70, 96);
pub const TEXT_MAIN: Color = Color::Rgb(230, 234, 240);
pub const TEXT_DIM: Color = Color::Rgb(150, 158, 172);
pub const ACCENT: Color = Color::Rgb(120, 190, 230);
pub const ACCENT_GOLD: Color = Color::Rgb(232, 184, 92);
pub const ERROR: Color = Color::Rgb(232, 96, 96);
