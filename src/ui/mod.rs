pub mod hud;
pub mod menu;

use ratatui::style::Color;
use ratatui::symbols::border;

/// Colors applied to every visual element.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub wall: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub border_bg: Color,
    pub hud_value: Color,
    pub hud_accent: Color,
    pub hud_muted: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Green snake on black, grey walls.
pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    food: Color::Red,
    wall: Color::Gray,
    play_bg: Color::Black,
    border_fg: Color::Gray,
    border_bg: Color::Black,
    hud_value: Color::White,
    hud_accent: Color::Yellow,
    hud_muted: Color::DarkGray,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

pub const GLYPH_SNAKE_HEAD: &str = "●";
pub const GLYPH_SNAKE_BODY: &str = "■";
pub const GLYPH_SNAKE_TAIL: &str = "▪";
pub const GLYPH_FOOD: &str = "◆";
pub const GLYPH_WALL: &str = "█";
