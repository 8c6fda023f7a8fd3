use mastery_core::DeckColor;
use ratatui::style::Stylize;
use ratatui::style::{Color, Style};

pub fn title_style() -> Style { Style::default().fg(Color::Cyan).bold() }
pub fn hint_style() -> Style { Style::default().fg(Color::DarkGray) }
pub fn selected_style() -> Style { Style::default().fg(Color::Yellow).bold() }
pub fn footer_style() -> Style { Style::default().fg(Color::Gray) }
pub fn status_style() -> Style { Style::default().fg(Color::Red) }

pub fn deck_swatch(color: DeckColor) -> Style {
    let c = match color {
        DeckColor::Clear => Color::Reset,
        DeckColor::Gray => Color::Gray,
        DeckColor::Pink => Color::LightMagenta,
        DeckColor::Red => Color::Red,
        DeckColor::Brown => Color::Rgb(150, 100, 60),
        DeckColor::Orange => Color::Rgb(255, 150, 0),
        DeckColor::Yellow => Color::Yellow,
        DeckColor::Green => Color::Green,
        DeckColor::Teal => Color::Cyan,
        DeckColor::Blue => Color::Blue,
        DeckColor::Indigo => Color::Rgb(90, 80, 210),
    };
    Style::default().fg(c)
}
