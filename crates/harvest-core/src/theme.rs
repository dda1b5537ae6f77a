// File: crates/harvest-core/src/theme.rs
// Summary: Renderer-agnostic colors, theme presets and the crop color legend.

use serde::{Serialize, Serializer};

/// 8-bit RGBA color. Serialized as `#RRGGBB` (or `#RRGGBBAA` when translucent).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a: 255 } }
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self { Self { r, g, b, a } }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let h = s.trim().trim_start_matches('#');
        let byte = |i: usize| u8::from_str_radix(h.get(i..i + 2)?, 16).ok();
        match h.len() {
            3 => {
                let nib = |i: usize| u8::from_str_radix(h.get(i..i + 1)?, 16).ok().map(|v| v * 17);
                Some(Self::rgb(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Stalk color, also used for crops without their own entry.
pub const STALK_COLOR: Color = Color::rgb(0xFF, 0xD7, 0x00);

/// Crops with a fixed color, in legend order.
pub const KNOWN_CROPS: [(&str, Color); 8] = [
    ("Wheat", Color::rgb(0xFF, 0xD7, 0x00)),
    ("Barley", Color::rgb(0xD2, 0xB4, 0x8C)),
    ("Corn", Color::rgb(0xFF, 0xA5, 0x00)),
    ("Millet", Color::rgb(0xBD, 0xB7, 0x6B)),
    ("Oats", Color::rgb(0xC0, 0xC0, 0xC0)),
    ("Rye", Color::rgb(0x8B, 0x45, 0x13)),
    ("Rice, Milled", Color::rgb(0xFF, 0xF8, 0xDC)),
    ("Sorghum", Color::rgb(0xA0, 0x52, 0x2D)),
];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendEntry {
    pub crop: String,
    pub color: Color,
    /// False for crops that fell back to the stalk color.
    pub known: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    pub fallback: Color,
}

impl Legend {
    /// The fixed crop palette.
    pub fn standard() -> Self {
        let entries = KNOWN_CROPS
            .iter()
            .map(|&(crop, color)| LegendEntry { crop: crop.to_string(), color, known: true })
            .collect();
        Self { entries, fallback: STALK_COLOR }
    }

    pub fn color_for(&self, crop: &str) -> Color {
        self.entries
            .iter()
            .find(|e| e.crop == crop)
            .map(|e| e.color)
            .unwrap_or(self.fallback)
    }

    pub fn contains(&self, crop: &str) -> bool {
        self.entries.iter().any(|e| e.crop == crop)
    }

    /// Append crops seen in the data that have no palette entry, in the order given.
    pub fn with_observed<'a>(mut self, crops: impl IntoIterator<Item = &'a str>) -> Self {
        for crop in crops {
            if !self.contains(crop) {
                self.entries.push(LegendEntry { crop: crop.to_string(), color: self.fallback, known: false });
            }
        }
        self
    }
}

impl Default for Legend {
    fn default() -> Self { Self::standard() }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub stalk: Color,
    pub year_label: Color,
    pub highlight: Color,
    pub panel_fill: Color,
    pub panel_stroke: Color,
    pub panel_text: Color,
}

impl Theme {
    /// White page, as the chart is usually embedded.
    pub fn field() -> Self {
        Self {
            name: "field",
            background: Color::rgb(0xFF, 0xFF, 0xFF),
            stalk: STALK_COLOR,
            year_label: Color::rgb(0x22, 0x22, 0x22),
            highlight: Color::rgb(0x33, 0x33, 0x33),
            panel_fill: Color::rgba(0xFF, 0xFF, 0xFF, 230),
            panel_stroke: Color::rgb(0xCC, 0xCC, 0xCC),
            panel_text: Color::rgb(0x22, 0x22, 0x22),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::rgb(18, 18, 20),
            stalk: STALK_COLOR,
            year_label: Color::rgb(235, 235, 245),
            highlight: Color::rgb(255, 255, 255),
            panel_fill: Color::rgba(40, 40, 45, 230),
            panel_stroke: Color::rgb(90, 90, 100),
            panel_text: Color::rgb(235, 235, 245),
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            name: "high-contrast",
            background: Color::rgb(0x00, 0x00, 0x00),
            stalk: Color::rgb(0xFF, 0xFF, 0x00),
            year_label: Color::rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::rgb(0x00, 0xFF, 0xFF),
            panel_fill: Color::rgb(0x00, 0x00, 0x00),
            panel_stroke: Color::rgb(0xFF, 0xFF, 0xFF),
            panel_text: Color::rgb(0xFF, 0xFF, 0xFF),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::field() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::field(), Theme::dark(), Theme::high_contrast()]
}

/// Find a theme by its `name`, falling back to the default field theme.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::field()
}
