#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background_color: &'static str,
    pub text_color: &'static str,
    pub input_background_color: &'static str,
    pub input_text_color: &'static str,
}

pub const DARK: Theme = Theme {
    name: "Dark",
    background_color: "#1e1e1e",
    text_color: "#ffffff",
    input_background_color: "#2c2c2c",
    input_text_color: "#ffffff",
};

pub const OCEAN: Theme = Theme {
    name: "Ocean",
    background_color: "#005f73",
    text_color: "#ffffff",
    input_background_color: "#0a9396",
    input_text_color: "#ffffff",
};

pub const FOREST: Theme = Theme {
    name: "Forest",
    background_color: "#2e8b57",
    text_color: "#ffffff",
    input_background_color: "#3cb371",
    input_text_color: "#ffffff",
};

pub const LIGHT: Theme = Theme {
    name: "Light",
    background_color: "#ffffff",
    text_color: "#000000",
    input_background_color: "#f0f0f0",
    input_text_color: "#000000",
};

/// Selector order.
static THEMES: [Theme; 4] = [DARK, OCEAN, FOREST, LIGHT];

const DEFAULT_THEME: Theme = LIGHT;

impl Theme {
    pub fn all() -> &'static [Theme] {
        &THEMES
    }
}

/// Exact lookup; anything unrecognized gets the Light theme.
pub fn resolve(name: &str) -> Theme {
    THEMES
        .iter()
        .copied()
        .find(|theme| theme.name == name)
        .unwrap_or(DEFAULT_THEME)
}

pub fn theme_from_query(name: Option<&str>) -> Theme {
    name.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(resolve)
        .unwrap_or(DEFAULT_THEME)
}
