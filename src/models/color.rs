use serde::{Deserialize, Serialize};

/// An sRGB triple with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb8(pub u8, pub u8, pub u8);

impl Rgb8 {
    /// Upper-case `RRGGBB`, no leading `#`
    pub fn to_hex(self) -> String {
        hex::encode_upper([self.0, self.1, self.2])
    }
}

/// Errors raised while turning user input into a color query
#[derive(Debug, thiserror::Error)]
pub enum ColorError {
    #[error("Invalid color")]
    InvalidInput,
    #[error("Unknown color name: {0}")]
    UnknownColorName(String),
}

/// Component values in the 0-1 range. Each space fills in only its own
/// components, so everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fraction {
    #[serde(default)]
    pub r: Option<f64>,
    #[serde(default)]
    pub g: Option<f64>,
    #[serde(default)]
    pub b: Option<f64>,
    #[serde(default)]
    pub h: Option<f64>,
    #[serde(default)]
    pub s: Option<f64>,
    #[serde(default)]
    pub l: Option<f64>,
    #[serde(default)]
    pub v: Option<f64>,
    #[serde(default)]
    pub c: Option<f64>,
    #[serde(default)]
    pub m: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub k: Option<f64>,
    #[serde(default, rename = "X")]
    pub x: Option<f64>,
    #[serde(default, rename = "Y")]
    pub y_xyz: Option<f64>,
    #[serde(default, rename = "Z")]
    pub z: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hex {
    pub value: String,
    pub clean: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    #[serde(default)]
    pub fraction: Fraction,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    #[serde(default)]
    pub fraction: Fraction,
    pub h: u16,
    pub s: u8,
    pub l: u8,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    #[serde(default)]
    pub fraction: Fraction,
    pub h: u16,
    pub s: u8,
    pub v: u8,
    pub value: String,
}

/// CMYK is undefined in c/m/y for pure black, where the API sends `null`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cmyk {
    #[serde(default)]
    pub fraction: Fraction,
    pub c: Option<u8>,
    pub m: Option<u8>,
    pub y: Option<u8>,
    pub k: Option<u8>,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Xyz {
    #[serde(default)]
    pub fraction: Fraction,
    #[serde(rename = "X")]
    pub x: u16,
    #[serde(rename = "Y")]
    pub y: u16,
    #[serde(rename = "Z")]
    pub z: u16,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Name {
    pub value: String,
    pub closest_named_hex: String,
    pub exact_match_name: bool,
    pub distance: u32,
}

impl Name {
    /// `distance == 0` and `exact_match_name` must agree
    pub fn is_consistent(&self) -> bool {
        (self.distance == 0) == self.exact_match_name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub bare: String,
    #[serde(default)]
    pub named: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contrast {
    #[serde(default)]
    pub value: String,
}

/// Structured response of the color-information API.
///
/// `_links` and `_embedded` are left out and skipped on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorInfo {
    pub hex: Hex,
    pub rgb: Rgb,
    pub hsl: Hsl,
    pub hsv: Hsv,
    pub name: Name,
    pub cmyk: Cmyk,
    #[serde(rename = "XYZ")]
    pub xyz: Xyz,
    #[serde(default)]
    pub image: Image,
    #[serde(default)]
    pub contrast: Contrast,
}

impl ColorInfo {
    /// The color as a 24-bit integer, parsed from `hex.clean`
    pub fn rgb24(&self) -> Option<u32> {
        u32::from_str_radix(&self.hex.clean, 16)
            .ok()
            .filter(|&v| v <= 0xFF_FFFF)
    }
}
