use crate::foundation::error::{PostcraftError, PostcraftResult};

pub use kurbo::Point;

/// Opaque sRGB colour, serialized as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

/// Straight (non-premultiplied) sRGB colour with alpha, serialized as CSS `rgba(...)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha, 255 = opaque.
    pub a: u8,
}

impl Rgb8 {
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Build a colour from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb`, `#rrggbb` or `rgb(r, g, b)`.
    pub fn parse(s: &str) -> PostcraftResult<Self> {
        let c = Rgba8::parse(s)?;
        if c.a != 255 {
            return Err(PostcraftError::validation(format!(
                "colour '{s}' must be opaque"
            )));
        }
        Ok(c.opaque())
    }

    /// Attach an alpha channel.
    pub const fn with_alpha(self, a: u8) -> Rgba8 {
        Rgba8 {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Lower-case `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Build a colour from channel values.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build a colour from channels plus a CSS alpha in `[0, 1]`.
    pub fn from_css_alpha(r: u8, g: u8, b: u8, alpha: f32) -> PostcraftResult<Self> {
        if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
            return Err(PostcraftError::validation(format!(
                "alpha {alpha} must be within [0, 1]"
            )));
        }
        // Nudge so decimal inputs like 0.7 land on the CSS-expected byte (179).
        Ok(Self::new(r, g, b, (alpha * 255.0 + 1e-3).round() as u8))
    }

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(...)` or `rgba(...)`.
    pub fn parse(s: &str) -> PostcraftResult<Self> {
        let t = s.trim();
        if let Some(hex) = t.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| invalid_colour(s));
        }

        let lower = t.to_ascii_lowercase();
        let (body, has_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = lower.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(invalid_colour(s));
        };
        let body = body.strip_suffix(')').ok_or_else(|| invalid_colour(s))?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();

        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(invalid_colour(s));
        }

        let mut ch = [0u8; 3];
        for (slot, part) in ch.iter_mut().zip(&parts) {
            *slot = part.parse::<u8>().map_err(|_| invalid_colour(s))?;
        }
        if has_alpha {
            let alpha = parts[3].parse::<f32>().map_err(|_| invalid_colour(s))?;
            return Self::from_css_alpha(ch[0], ch[1], ch[2], alpha);
        }
        Ok(Self::new(ch[0], ch[1], ch[2], 255))
    }

    /// Drop the alpha channel.
    pub const fn opaque(self) -> Rgb8 {
        Rgb8::new(self.r, self.g, self.b)
    }

    /// Alpha as a CSS fraction in `[0, 1]`.
    pub fn alpha_f32(self) -> f32 {
        f32::from(self.a) / 255.0
    }

    /// Premultiplied channel order `[r, g, b, a]`.
    pub fn premultiplied(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }

    /// CSS `rgba(r,g,b,a)` with at most three alpha decimals.
    pub fn to_css(self) -> String {
        let alpha = format!("{:.3}", self.alpha_f32());
        let alpha = alpha.trim_end_matches('0').trim_end_matches('.');
        let alpha = if alpha.is_empty() { "0" } else { alpha };
        format!("rgba({},{},{},{})", self.r, self.g, self.b, alpha)
    }
}

impl From<Rgb8> for Rgba8 {
    fn from(c: Rgb8) -> Self {
        c.with_alpha(255)
    }
}

impl From<Rgb8> for String {
    fn from(c: Rgb8) -> Self {
        c.to_hex()
    }
}

impl From<Rgba8> for String {
    fn from(c: Rgba8) -> Self {
        c.to_css()
    }
}

impl TryFrom<String> for Rgb8 {
    type Error = PostcraftError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = PostcraftError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

fn parse_hex(hex: &str) -> Option<Rgba8> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Rgba8::new(nibble(0)?, nibble(1)?, nibble(2)?, 255)),
        6 => Some(Rgba8::new(byte(0)?, byte(2)?, byte(4)?, 255)),
        8 => Some(Rgba8::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn invalid_colour(s: &str) -> PostcraftError {
    PostcraftError::validation(format!("unrecognised colour '{s}'"))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
