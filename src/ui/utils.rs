use eframe::egui::{Color32, Context, Visuals};

use crate::ui::config::UI_CONFIG;

/// `#rrggbb` to a colour with the given opacity. Malformed input gives gray.
pub fn hex_to_color32(hex: &str, opacity: f64) -> Color32 {
    let digits = hex.trim_start_matches('#');
    let channel = |i: usize| {
        digits
            .get(i..i + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
    };
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    match (digits.len(), channel(0), channel(2), channel(4)) {
        (6, Some(r), Some(g), Some(b)) => Color32::from_rgba_unmultiplied(r, g, b, alpha),
        _ => Color32::GRAY,
    }
}

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::light();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.central_panel;
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;

    ctx.set_visuals(visuals);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_color32() {
        assert_eq!(
            hex_to_color32("#1f77b4", 1.0),
            Color32::from_rgba_unmultiplied(0x1f, 0x77, 0xb4, 255)
        );
        assert_eq!(hex_to_color32("#000000", 0.0).a(), 0);
        assert_eq!(hex_to_color32("nonsense", 1.0), Color32::GRAY);
        assert_eq!(hex_to_color32("#12", 1.0), Color32::GRAY);
    }
}
