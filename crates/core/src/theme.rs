//! Static catalog of PDF themes.
//!
//! Themes only parameterize the backend's PDF rendering; nothing about the
//! selection is persisted. The palette shape mirrors what the renderer
//! consumes.

use serde::Serialize;

/// Color palette of a theme, as hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub background: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
    pub sidebar: &'static str,
}

/// A named visual theme for PDF export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    /// Stable identifier sent as the `theme` query parameter.
    pub id: &'static str,
    /// Human-readable name shown in the picker.
    pub name: &'static str,
    pub palette: Palette,
}

/// Theme the backend falls back to for unknown IDs.
pub const DEFAULT_THEME_ID: &str = "modern-blue";

/// The full theme catalog.
pub const THEMES: [Theme; 5] = [
    Theme {
        id: "modern-blue",
        name: "Modern Blue",
        palette: Palette {
            primary: "#2563eb",
            secondary: "#1d4ed8",
            background: "#f8fafc",
            text: "#1e293b",
            accent: "#60a5fa",
            sidebar: "#1e3a8a",
        },
    },
    Theme {
        id: "elegant-dark",
        name: "Elegant Dark",
        palette: Palette {
            primary: "#334155",
            secondary: "#1e293b",
            background: "#f1f5f9",
            text: "#0f172a",
            accent: "#94a3b8",
            sidebar: "#0f172a",
        },
    },
    Theme {
        id: "creative-purple",
        name: "Creative Purple",
        palette: Palette {
            primary: "#7c3aed",
            secondary: "#6d28d9",
            background: "#faf5ff",
            text: "#2e1065",
            accent: "#a78bfa",
            sidebar: "#5b21b6",
        },
    },
    Theme {
        id: "minimal-slate",
        name: "Minimal Slate",
        palette: Palette {
            primary: "#475569",
            secondary: "#334155",
            background: "#ffffff",
            text: "#1e293b",
            accent: "#cbd5e1",
            sidebar: "#475569",
        },
    },
    Theme {
        id: "classic-crimson",
        name: "Classic Crimson",
        palette: Palette {
            primary: "#be123c",
            secondary: "#9f1239",
            background: "#fff1f2",
            text: "#1c1917",
            accent: "#fda4af",
            sidebar: "#881337",
        },
    },
];

impl Theme {
    /// Look up a theme by ID.
    #[must_use]
    pub fn find(id: &str) -> Option<&'static Self> {
        THEMES.iter().find(|theme| theme.id == id)
    }

    /// Look up a theme by ID, falling back to the default.
    #[must_use]
    pub fn find_or_default(id: &str) -> &'static Self {
        Self::find(id).unwrap_or_else(|| Self::find(DEFAULT_THEME_ID).unwrap_or(&THEMES[0]))
    }
}
