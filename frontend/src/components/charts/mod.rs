pub mod donut;
pub mod stacked_bar;

pub use donut::DonutChart;
pub use stacked_bar::StackedBarChart;

use plotters::style::RGBColor;

const PALETTE: [RGBColor; 10] = [
    RGBColor(79, 129, 189),
    RGBColor(192, 80, 77),
    RGBColor(155, 187, 89),
    RGBColor(128, 100, 162),
    RGBColor(75, 172, 198),
    RGBColor(247, 150, 70),
    RGBColor(44, 77, 117),
    RGBColor(119, 44, 42),
    RGBColor(95, 117, 48),
    RGBColor(77, 59, 98),
];

/// Series colors cycle through the palette.
pub(crate) fn color_at(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// Axis label: 1.5M, 250K, 900.
pub(crate) fn short_amount(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.0}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_amount() {
        assert_eq!(short_amount(1_500_000.0), "1.5M");
        assert_eq!(short_amount(250_000.0), "250K");
        assert_eq!(short_amount(900.0), "900");
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(color_at(0), color_at(PALETTE.len()));
    }
}
