/// Background shown for empty cells.
pub const EMPTY_COLOR: &str = "#93c0bb";
/// Used for tiles above 2048.
pub const FALLBACK_COLOR: &str = "#3c3a32";

const TILE_COLORS: [(u32, &str); 11] = [
    (2, "#1f5048"),
    (4, "#2d725e"),
    (8, "#d8fff9"),
    (16, "#b2fff3"),
    (32, "#1ece9f"),
    (64, "#6dff91"),
    (128, "#72ea8e"),
    (256, "#ea8572"),
    (512, "#ffc7be"),
    (1024, "#ffe3de"),
    (2048, "#ea7272"),
];

/// Returns the CSS color for a cell value.
pub fn tile_color(value: u32) -> &'static str {
    if value == 0 {
        return EMPTY_COLOR;
    }
    TILE_COLORS
        .iter()
        .find(|(tile, _)| *tile == value)
        .map_or(FALLBACK_COLOR, |(_, color)| *color)
}
