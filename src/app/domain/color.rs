use std::fmt;
use std::str::FromStr;

/// An opaque RGB color as produced by a color picker (`#rrggbb`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba(self) -> Rgba {
        Rgba::opaque(self.r, self.g, self.b)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Accepts `#rgb`, `#rrggbb`, with or without the leading `#`.
impl FromStr for HexColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("invalid color '{}'", s));
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|e| e.to_string());

        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1].repeat(2));
                Ok(Self::new(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(format!("invalid color '{}'", s)),
        }
    }
}

/// Straight (non-premultiplied) RGBA color used in rendered scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);
}

impl From<syntect::highlighting::Color> for Rgba {
    fn from(c: syntect::highlighting::Color) -> Self {
        Self::new(c.r, c.g, c.b, c.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_form() {
        let c: HexColor = "#282c34".parse().unwrap();
        assert_eq!(c, HexColor::new(0x28, 0x2c, 0x34));
        assert_eq!(c.to_string(), "#282c34");
    }

    #[test]
    fn test_parse_is_case_insensitive_and_prefix_optional() {
        assert_eq!("FF5F56".parse::<HexColor>(), Ok(HexColor::new(0xff, 0x5f, 0x56)));
        assert_eq!("#Ff5f56".parse::<HexColor>().unwrap().to_string(), "#ff5f56");
    }

    #[test]
    fn test_parse_short_form() {
        assert_eq!("#fa0".parse::<HexColor>(), Ok(HexColor::new(0xff, 0xaa, 0x00)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<HexColor>().is_err());
        assert!("#12345".parse::<HexColor>().is_err());
        assert!("#gg0000".parse::<HexColor>().is_err());
        assert!("#+1+2+3".parse::<HexColor>().is_err());
    }
}
