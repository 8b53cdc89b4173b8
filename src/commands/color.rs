use tracing::{error, info};

use crate::commands::Context;
use crate::models::{ColorError, ColorInfo, Embed, Reply};
use crate::services::notation::classify;
use crate::services::query::normalize;
use crate::state::AppState;

pub const INVALID_COLOR: &str = "Invalid color";
pub const FETCH_FAILED: &str = "An error occurred while fetching the color information.";

/// `/color`: identify a color and summarize it
pub async fn color(state: &AppState, ctx: &Context, input: &str, mention: Option<&str>) -> Reply {
    let notation = classify(input, &state.colors);
    info!(user = ctx.user(), input, ?notation, "Color lookup");

    let query = match normalize(input, notation, &state.colors) {
        Ok(query) => query,
        Err(ColorError::InvalidInput) => return Reply::text(INVALID_COLOR).ephemeral(),
        Err(e @ ColorError::UnknownColorName(_)) => {
            // classify and normalize share one table, so this is a bug
            error!(error = %e, "Named color disappeared after classification");
            return Reply::text(FETCH_FAILED);
        }
    };

    match state.color_api.fetch(&query).await {
        Ok(info) => Reply::embed(color_embed(&info)).mention(mention),
        Err(e) => {
            error!(error = %e, input, "Failed to fetch color information");
            Reply::text(FETCH_FAILED)
        }
    }
}

/// Summary card: the four main notations, then either the exact name or
/// the closest named color.
pub fn color_embed(info: &ColorInfo) -> Embed {
    let mut embed = Embed::new().title(&info.name.value);

    if let Some(rgb) = info.rgb24() {
        embed = embed
            .color(rgb)
            .thumbnail(format!("https://singlecolorimage.com/get/{rgb:06X}/128x128"));
    }

    embed = embed
        .field("Hex", &info.hex.value, true)
        .field("RGB", &info.rgb.value, true)
        .field("HSL", &info.hsl.value, true)
        .field("CMYK", &info.cmyk.value, true);

    if info.name.distance == 0 {
        embed.field("Named", &info.name.value, true)
    } else {
        embed
            .field("Closest Named Color", &info.name.value, true)
            .field("Closest Named Hex", &info.name.closest_named_hex, true)
    }
}
