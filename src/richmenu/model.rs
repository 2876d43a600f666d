use serde::{Deserialize, Serialize};

/// Canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const LARGE: Size = Size { width: 2500, height: 1686 };
    pub const COMPACT: Size = Size { width: 2500, height: 843 };

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Tappable rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn fits_within(&self, size: Size) -> bool {
        self.right() <= size.width && self.bottom() <= size.height
    }

    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.bottom() && other.y < self.bottom()
    }

    /// Position and size as percentages of the canvas, for editor overlays.
    pub fn as_percent(&self, size: Size) -> PercentBounds {
        let pct = |value: u32, total: u32| value as f64 * 100.0 / total as f64;
        PercentBounds {
            x: pct(self.x, size.width),
            y: pct(self.y, size.height),
            width: pct(self.width, size.width),
            height: pct(self.height, size.height),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// LINE action object, serialized in the Messaging API wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Uri {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        label: Option<String>,
        uri: String,
    },
    Message {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        label: Option<String>,
        text: String,
    },
    Postback {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        label: Option<String>,
        data: String,
        #[serde(rename = "displayText", skip_serializing_if = "Option::is_none", default)]
        display_text: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub bounds: Bounds,
    pub action: Action,
}

/// Rich menu definition as sent to the create endpoint. The id only exists
/// once LINE has accepted the definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichMenu {
    pub size: Size,
    pub selected: bool,
    pub name: String,
    pub chat_bar_text: String,
    pub areas: Vec<Area>,
}

pub const CHAT_BAR_TEXT_MAX_CHARS: usize = 14;

/// Chat bar label derived from the menu name, cut on a character boundary.
pub fn chat_bar_text(name: &str) -> String {
    name.chars().take(CHAT_BAR_TEXT_MAX_CHARS).collect()
}
