use ratatui::style::Color;

pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub bar: Color,
    pub active: Color,   // Compared or moved elements
    pub boundary: Color, // Pivots and region markers
    pub hot: Color,      // Bars past the heat threshold
    pub border_focused: Color,
    pub border_normal: Color,
    pub status_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    bg: Color::Rgb(30, 30, 46),
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    bar: Color::Rgb(186, 194, 222),
    active: Color::Rgb(243, 139, 168),         // Red, like the compared pair
    boundary: Color::Rgb(137, 180, 250),       // Blue for pivots/boundaries
    hot: Color::Rgb(250, 179, 135),            // Orange for swap-heavy slots
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for the winner
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    status_bg: Color::Rgb(50, 50, 70),
};
