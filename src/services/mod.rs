pub mod code_format;
pub mod color_api;
pub mod filter;
pub mod latex;
pub mod named_colors;
pub mod notation;
pub mod palette;
pub mod query;
