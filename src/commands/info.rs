use chrono::{Duration, Utc};

use crate::commands::{Context, GUILD_ONLY};
use crate::models::{Embed, Reply};
use crate::state::AppState;

const SOURCE: &str = "[View on GitHub](https://github.com/BrackeysCommunity/Pencil)";
const EMBED_COLOR: u32 = 0x5865F2;

/// Largest whole unit of `elapsed`, e.g. "3 days"
pub fn humanize(elapsed: Duration) -> String {
    let units = [
        (elapsed.num_days(), "day"),
        (elapsed.num_hours(), "hour"),
        (elapsed.num_minutes(), "minute"),
        (elapsed.num_seconds(), "second"),
    ];
    let (n, unit) = units
        .into_iter()
        .find(|&(n, _)| n > 0)
        .unwrap_or((0, "second"));
    format!("{n} {unit}{}", if n == 1 { "" } else { "s" })
}

/// `/info`: version and uptime
pub fn info(state: &AppState, ctx: &Context) -> Reply {
    if !ctx.in_guild() {
        return Reply::text(GUILD_ONLY).ephemeral();
    }

    let version = env!("CARGO_PKG_VERSION");
    let versions = format!(
        "Pencil: {version}\nHost: {}/{}\n",
        std::env::consts::OS,
        std::env::consts::ARCH
    );

    let embed = Embed::new()
        .title(format!("Pencil v{version}"))
        .color(EMBED_COLOR)
        .field("Uptime", humanize(Utc::now() - state.started_at), true)
        .field("Source", SOURCE, true)
        .field("Version", format!("```\n{versions}```"), false);
    Reply::embed(embed).ephemeral()
}
