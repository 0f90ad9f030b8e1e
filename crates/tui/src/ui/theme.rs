use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub positive: Color,
    pub negative: Color,
    pub error: Color,
    /// Fixed chart palette; rendering cycles it by index.
    pub palette: [Color; 8],
}

impl Theme {
    /// Color for the `index`-th series, cycling modulo the palette size.
    pub fn palette_color(&self, index: usize) -> Color {
        self.palette[index % self.palette.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(80, 160, 160),
            border: Color::Rgb(60, 70, 80),
            border_focused: Color::Rgb(80, 160, 160),
            positive: Color::Rgb(40, 167, 69),
            negative: Color::Rgb(220, 53, 69),
            error: Color::Rgb(200, 80, 80),
            palette: [
                Color::Rgb(102, 126, 234),
                Color::Rgb(118, 75, 162),
                Color::Rgb(240, 147, 251),
                Color::Rgb(79, 172, 254),
                Color::Rgb(0, 242, 254),
                Color::Rgb(67, 233, 123),
                Color::Rgb(250, 112, 154),
                Color::Rgb(254, 225, 64),
            ],
        }
    }
}
