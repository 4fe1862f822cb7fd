use ratatui::style::Color;

// Centralized theme colors. Keep these as small helpers so components do
// not hard-code palette choices.

pub const ACCENT_RGB: (u8, u8, u8) = (200, 100, 0);

pub fn accent() -> Color {
    Color::Rgb(ACCENT_RGB.0, ACCENT_RGB.1, ACCENT_RGB.2)
}

// Menu bar
pub fn menu_bar_bg() -> Color {
    Color::DarkGray
}
pub fn menu_bar_fg() -> Color {
    Color::White
}
pub fn menu_bar_hint_fg() -> Color {
    Color::Gray
}

// Pane header
pub fn pane_header_bg() -> Color {
    Color::DarkGray
}
pub fn pane_header_focused_bg() -> Color {
    Color::Blue
}
pub fn pane_header_fg() -> Color {
    Color::White
}

// Dock strip
pub fn dock_bg() -> Color {
    Color::Black
}
pub fn dock_fg() -> Color {
    Color::White
}
pub fn dock_border() -> Color {
    accent()
}
pub fn dock_selected_bg() -> Color {
    Color::Gray
}
pub fn dock_selected_fg() -> Color {
    Color::Black
}

/// Map a normalized depth sample (0.0 near, 1.0 far) onto a blue-to-red ramp.
pub fn depth_color(value: f32) -> Color {
    let v = value.clamp(0.0, 1.0);
    let r = (255.0 * (1.0 - v)) as u8;
    let b = (255.0 * v) as u8;
    let g = (255.0 * (1.0 - (2.0 * v - 1.0).abs())) as u8;
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn accent_returns_rgb() {
        assert!(matches!(accent(), Color::Rgb(200, 100, 0)));
    }

    #[test]
    fn depth_color_spans_near_to_far() {
        assert_eq!(depth_color(0.0), Color::Rgb(255, 0, 0));
        assert_eq!(depth_color(1.0), Color::Rgb(0, 0, 255));
        assert_eq!(depth_color(0.5), Color::Rgb(127, 255, 127));
        // out of range values clamp
        assert_eq!(depth_color(-3.0), depth_color(0.0));
    }
}
