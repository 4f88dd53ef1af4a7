use ratatui::style::Color;

use super::Theme;

pub fn hex_to_color(hex: u32) -> Color {
    Color::Rgb(
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
    )
}

/// Default palette, after the product's slate-and-purple styling.
pub struct NovexDark;

impl Theme for NovexDark {
    fn name(&self) -> &'static str {
        "Novex Dark"
    }

    fn background(&self) -> Color {
        hex_to_color(0x0f172a)
    }

    fn foreground(&self) -> Color {
        hex_to_color(0xe2e8f0)
    }

    fn foreground_dim(&self) -> Color {
        hex_to_color(0x64748b)
    }

    fn surface(&self) -> Color {
        hex_to_color(0x1e293b)
    }

    fn border(&self) -> Color {
        hex_to_color(0x334155)
    }

    fn selection(&self) -> Color {
        hex_to_color(0x312e81)
    }

    fn accent(&self) -> Color {
        hex_to_color(0x8b5cf6)
    }

    fn accent_secondary(&self) -> Color {
        hex_to_color(0x3b82f6)
    }

    fn success(&self) -> Color {
        hex_to_color(0x22c55e)
    }

    fn warning(&self) -> Color {
        hex_to_color(0xf59e0b)
    }

    fn error(&self) -> Color {
        hex_to_color(0xef4444)
    }

    fn info(&self) -> Color {
        hex_to_color(0x06b6d4)
    }
}

pub struct NovexLight;

impl Theme for NovexLight {
    fn name(&self) -> &'static str {
        "Novex Light"
    }

    fn background(&self) -> Color {
        hex_to_color(0xf8fafc)
    }

    fn foreground(&self) -> Color {
        hex_to_color(0x0f172a)
    }

    fn foreground_dim(&self) -> Color {
        hex_to_color(0x94a3b8)
    }

    fn surface(&self) -> Color {
        hex_to_color(0xe2e8f0)
    }

    fn border(&self) -> Color {
        hex_to_color(0xcbd5e1)
    }

    fn selection(&self) -> Color {
        hex_to_color(0xddd6fe)
    }

    fn accent(&self) -> Color {
        hex_to_color(0x7c3aed)
    }

    fn accent_secondary(&self) -> Color {
        hex_to_color(0x2563eb)
    }

    fn success(&self) -> Color {
        hex_to_color(0x16a34a)
    }

    fn warning(&self) -> Color {
        hex_to_color(0xd97706)
    }

    fn error(&self) -> Color {
        hex_to_color(0xdc2626)
    }

    fn info(&self) -> Color {
        hex_to_color(0x0891b2)
    }
}
