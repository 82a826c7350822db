/// 24-bit colour as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const GREEN:  Self = Self { r: 0xa6, g: 0xe3, b: 0xa1 }; // #a6e3a1
    pub const YELLOW: Self = Self { r: 0xf9, g: 0xe2, b: 0xaf }; // #f9e2af
    pub const RED:    Self = Self { r: 0xf3, g: 0x8b, b: 0xa8 }; // #f38ba8

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RRGGBBAA`).
    /// The alpha byte is accepted but a terminal has no use for it.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        match hex.len() {
            6 | 8 => Some(Self {
                r: byte(&hex[0..2])?,
                g: byte(&hex[2..4])?,
                b: byte(&hex[4..6])?,
            }),
            _ => None,
        }
    }

    /// Wrap `text` in a truecolor foreground escape and a reset.
    pub fn paint(self, text: &str) -> String {
        format!("\x1b[38;2;{};{};{}m{text}\x1b[0m", self.r, self.g, self.b)
    }
}
