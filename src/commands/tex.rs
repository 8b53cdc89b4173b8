use tracing::info;

use crate::commands::Context;
use crate::models::{Embed, Reply};
use crate::services::latex::RenderError;
use crate::state::AppState;

pub const FILTERED: &str = "The expression contains a filtered word.";
pub const NO_CONTENT: &str = "This message does not contain any content.";

const ERROR_COLOR: u32 = 0xE74C3C;

fn error_reply(e: &RenderError) -> Reply {
    let embed = Embed::new()
        .color(ERROR_COLOR)
        .title("Error displaying TeX")
        .description(format!("```\n{e}\n```"));
    Reply::embed(embed).ephemeral()
}

fn file_name(spoiler: bool) -> String {
    format!("{}output.png", if spoiler { "SPOILER_" } else { "" })
}

/// `/tex`: render an expression and post it as an image
pub async fn tex(
    state: &AppState,
    ctx: &Context,
    expression: &str,
    spoiler: bool,
    mention: Option<&str>,
) -> Reply {
    info!(user = ctx.user(), expression, spoiler, "Rendering TeX");

    if state.filter.contains_filtered_expression(expression) {
        return Reply::text(FILTERED).ephemeral();
    }

    match state.latex.render(expression).await {
        Ok(png) => Reply::attachment(file_name(spoiler), png).mention(mention),
        Err(e) => error_reply(&e),
    }
}

/// "Render TeX" message action: render a message's content, visible only
/// to the invoker
pub async fn render_tex(state: &AppState, ctx: &Context, content: &str) -> Reply {
    if content.trim().is_empty() {
        return Reply::text(NO_CONTENT).ephemeral();
    }

    info!(user = ctx.user(), content, "Rendering TeX for message");
    match state.latex.render(content).await {
        Ok(png) => Reply::attachment(file_name(false), png).ephemeral(),
        Err(e) => error_reply(&e),
    }
}
