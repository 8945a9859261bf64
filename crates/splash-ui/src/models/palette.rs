//! Card colors for the todo list.
//!
//! Purely decorative: a row's color follows its current position and is
//! recomputed on every render.

/// Foreground used on top of a card background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTone {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardStyle {
    pub name: &'static str,
    /// Background as `(r, g, b)`
    pub background: (u8, u8, u8),
    pub text: TextTone,
}

impl CardStyle {
    const fn new(name: &'static str, background: (u8, u8, u8), text: TextTone) -> Self {
        Self {
            name,
            background,
            text,
        }
    }

    /// Background as `#RRGGBB`
    pub fn hex(&self) -> String {
        let (r, g, b) = self.background;
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }
}

pub const PALETTE: [CardStyle; 8] = [
    CardStyle::new("red", (0xFF, 0x52, 0x52), TextTone::White),
    CardStyle::new("green", (0x4C, 0xAF, 0x50), TextTone::White),
    CardStyle::new("blue", (0x21, 0x96, 0xF3), TextTone::White),
    CardStyle::new("orange", (0xFF, 0x98, 0x00), TextTone::Black),
    CardStyle::new("purple", (0x9C, 0x27, 0xB0), TextTone::White),
    CardStyle::new("teal", (0x00, 0x96, 0x88), TextTone::White),
    CardStyle::new("amber", (0xFF, 0xC1, 0x07), TextTone::Black),
    CardStyle::new("indigo", (0x3F, 0x51, 0xB5), TextTone::White),
];

/// Palette slot for the row at `index`.
pub fn palette_index(index: usize) -> usize {
    index % PALETTE.len()
}

pub fn card_style(index: usize) -> CardStyle {
    PALETTE[palette_index(index)]
}
