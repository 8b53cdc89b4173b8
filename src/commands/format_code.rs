use tracing::info;

use crate::commands::{Context, GUILD_ONLY};
use crate::models::Reply;
use crate::services::code_format::create_codeblock;
use crate::state::AppState;

/// "Format Code" / "Format Code (Public)" message actions.
///
/// Both reply to the invoker only; `public` is kept for the log line.
pub fn format_code(state: &AppState, ctx: &Context, content: &str, public: bool) -> Reply {
    if !ctx.in_guild() {
        return Reply::text(GUILD_ONLY).ephemeral();
    }

    info!(user = ctx.user(), public, "Formatting code");
    Reply::text(create_codeblock(content, state.formatter.as_ref())).ephemeral()
}
