//! Colour palettes and the theme context handed down to the UI.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque colour from `0xRRGGBB`.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
            a: 0xFF,
        }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub error_light: Color,
    pub background: Color,
    pub card: Color,
    pub card_elevated: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub border: Color,
}

const ERROR: Color = Color::hex(0xEF4444);

static LIGHT: Palette = Palette {
    primary: Color::hex(0xFF6B6B),
    secondary: Color::hex(0x4F46E5),
    success: Color::hex(0x10B981),
    warning: Color::hex(0xF59E0B),
    error: ERROR,
    error_light: ERROR.with_alpha(26),
    background: Color::hex(0xF9FAFB),
    card: Color::hex(0xFFFFFF),
    card_elevated: Color::hex(0xF3F4F6),
    text: Color::hex(0x1F2937),
    text_secondary: Color::hex(0x6B7280),
    border: Color::hex(0xE5E7EB),
};

static DARK: Palette = Palette {
    primary: Color::hex(0xFF6B6B),
    secondary: Color::hex(0x4F46E5),
    success: Color::hex(0x10B981),
    warning: Color::hex(0xF59E0B),
    error: ERROR,
    error_light: ERROR.with_alpha(38),
    background: Color::hex(0x121212),
    card: Color::hex(0x1E1E1E),
    card_elevated: Color::hex(0x2D2D2D),
    text: Color::hex(0xF9FAFB),
    text_secondary: Color::hex(0x9CA3AF),
    border: Color::hex(0x374151),
};

static LUXE: Palette = Palette {
    primary: Color::hex(0xF59E0B),
    secondary: Color::hex(0x10B981),
    success: Color::hex(0x10B981),
    warning: Color::hex(0xF59E0B),
    error: ERROR,
    error_light: ERROR.with_alpha(38),
    background: Color::hex(0x0F172A),
    card: Color::hex(0x1E293B),
    card_elevated: Color::hex(0x334155),
    text: Color::hex(0xF9FAFB),
    text_secondary: Color::hex(0x9CA3AF),
    border: Color::hex(0x475569),
};

static NEON: Palette = Palette {
    primary: Color::hex(0xEC4899),
    secondary: Color::hex(0x3B82F6),
    success: Color::hex(0x10B981),
    warning: Color::hex(0xF59E0B),
    error: ERROR,
    error_light: ERROR.with_alpha(38),
    background: Color::hex(0x18181B),
    card: Color::hex(0x27272A),
    card_elevated: Color::hex(0x3F3F46),
    text: Color::hex(0xF9FAFB),
    text_secondary: Color::hex(0x9CA3AF),
    border: Color::hex(0x52525B),
};

static RETRO: Palette = Palette {
    primary: Color::hex(0x8B5CF6),
    secondary: Color::hex(0xF59E0B),
    success: Color::hex(0x10B981),
    warning: Color::hex(0xF59E0B),
    error: ERROR,
    error_light: ERROR.with_alpha(38),
    background: Color::hex(0xFEFCE8),
    card: Color::hex(0xFFFFFF),
    card_elevated: Color::hex(0xF5F5F4),
    text: Color::hex(0x1C1917),
    text_secondary: Color::hex(0x78716C),
    border: Color::hex(0xE7E5E4),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    Light,
    Dark,
    Luxe,
    Neon,
    Retro,
}

impl ThemeKind {
    pub const ALL: [ThemeKind; 5] = [
        ThemeKind::Light,
        ThemeKind::Dark,
        ThemeKind::Luxe,
        ThemeKind::Neon,
        ThemeKind::Retro,
    ];

    pub fn palette(self) -> &'static Palette {
        match self {
            ThemeKind::Light => &LIGHT,
            ThemeKind::Dark => &DARK,
            ThemeKind::Luxe => &LUXE,
            ThemeKind::Neon => &NEON,
            ThemeKind::Retro => &RETRO,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, ThemeKind::Dark | ThemeKind::Luxe | ThemeKind::Neon)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ThemeKind::Light => "Light",
            ThemeKind::Dark => "Dark",
            ThemeKind::Luxe => "Luxe",
            ThemeKind::Neon => "Neon Pop",
            ThemeKind::Retro => "Retro",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ThemeKind::Light => "Clean and bright theme for daytime use",
            ThemeKind::Dark => "Dark theme for low light environments",
            ThemeKind::Luxe => "Premium gold and black accents",
            ThemeKind::Neon => "Vibrant colors with neon accents",
            ThemeKind::Retro => "90s inspired color scheme",
        }
    }
}

/// Current theme selection. Built once at startup and passed to whoever
/// renders; `set_theme` is the only way to change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeContext {
    preference: Option<ThemeKind>,
    system_dark: bool,
}

impl ThemeContext {
    pub fn new(preference: Option<ThemeKind>, system_dark: bool) -> Self {
        Self {
            preference,
            system_dark,
        }
    }

    /// The chosen theme, or the system scheme when nothing was chosen.
    pub fn active(&self) -> ThemeKind {
        self.preference.unwrap_or(if self.system_dark {
            ThemeKind::Dark
        } else {
            ThemeKind::Light
        })
    }

    pub fn preference(&self) -> Option<ThemeKind> {
        self.preference
    }

    pub fn palette(&self) -> &'static Palette {
        self.active().palette()
    }

    pub fn is_dark(&self) -> bool {
        self.active().is_dark()
    }

    pub fn set_theme(&mut self, theme: ThemeKind) {
        self.preference = Some(theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_splits_channels() {
        assert_eq!(
            Color::hex(0xFF6B6B),
            Color {
                r: 0xFF,
                g: 0x6B,
                b: 0x6B,
                a: 0xFF
            }
        );
    }

    #[test]
    fn every_kind_has_a_distinct_palette() {
        for (i, a) in ThemeKind::ALL.iter().enumerate() {
            for b in &ThemeKind::ALL[i + 1..] {
                assert_ne!(a.palette(), b.palette(), "{a:?} and {b:?} share a palette");
            }
        }
    }

    #[test]
    fn dark_kinds_have_dark_backgrounds() {
        for kind in ThemeKind::ALL {
            let bg = kind.palette().background;
            let luminance = u32::from(bg.r) + u32::from(bg.g) + u32::from(bg.b);
            assert_eq!(kind.is_dark(), luminance < 3 * 128, "{kind:?}");
        }
    }

    #[test]
    fn no_preference_follows_system_scheme() {
        assert_eq!(ThemeContext::new(None, false).active(), ThemeKind::Light);
        assert_eq!(ThemeContext::new(None, true).active(), ThemeKind::Dark);
        assert_eq!(
            ThemeContext::new(Some(ThemeKind::Retro), true).active(),
            ThemeKind::Retro
        );
    }

    #[test]
    fn set_theme_changes_active_palette() {
        let mut context = ThemeContext::new(None, false);
        context.set_theme(ThemeKind::Luxe);

        assert_eq!(context.active(), ThemeKind::Luxe);
        assert!(context.is_dark());
        assert_eq!(context.palette().primary, Color::hex(0xF59E0B));
    }

    #[test]
    fn kinds_serialize_as_lowercase_tags() {
        assert_eq!(serde_json::to_string(&ThemeKind::Neon).unwrap(), "\"neon\"");
        let kind: ThemeKind = serde_json::from_str("\"luxe\"").unwrap();
        assert_eq!(kind, ThemeKind::Luxe);
    }
}
