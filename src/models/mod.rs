pub mod color;
pub mod reply;

pub use color::{
    Cmyk, ColorError, ColorInfo, Contrast, Fraction, Hex, Hsl, Hsv, Image, Name, Rgb, Rgb8, Xyz,
};
pub use reply::{Attachment, Embed, EmbedField, Reply, Thumbnail};
