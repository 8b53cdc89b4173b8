//! Command handlers. Each takes the shared state plus its parsed options and
//! answers with a [`Reply`].

pub mod color;
pub mod format_code;
pub mod info;
pub mod tex;

use serde_json::Value;

use crate::models::Reply;
use crate::state::AppState;

/// Message used to reject guild-only commands elsewhere
pub const GUILD_ONLY: &str = "This command can only be used in a server.";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Missing required option: {0}")]
    MissingOption(&'static str),
    #[error("Invalid value for option: {0}")]
    InvalidOption(&'static str),
}

/// Who invoked a command, and where
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub user_id: Option<String>,
    pub guild_id: Option<String>,
}

impl Context {
    pub fn user(&self) -> &str {
        self.user_id.as_deref().unwrap_or("unknown")
    }

    pub fn in_guild(&self) -> bool {
        self.guild_id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Color {
        color: String,
        mention: Option<String>,
    },
    Tex {
        expression: String,
        spoiler: bool,
        mention: Option<String>,
    },
    RenderTex {
        content: String,
    },
    FormatCode {
        content: String,
        public: bool,
    },
    Info,
}

impl Command {
    /// Build a command from its registered name, its options and, for
    /// message context commands, the target message content.
    pub fn parse(
        name: &str,
        options: &[(String, Value)],
        target_message: Option<&str>,
    ) -> Result<Self, CommandError> {
        let option = |key: &str| options.iter().find(|(k, _)| k == key).map(|(_, v)| v);
        let string = |key: &'static str| -> Result<Option<String>, CommandError> {
            match option(key) {
                None | Some(Value::Null) => Ok(None),
                Some(Value::String(s)) => Ok(Some(s.clone())),
                Some(_) => Err(CommandError::InvalidOption(key)),
            }
        };
        let message = || {
            target_message
                .map(String::from)
                .ok_or(CommandError::MissingOption("message"))
        };

        match name {
            "color" => Ok(Command::Color {
                color: string("color")?.ok_or(CommandError::MissingOption("color"))?,
                mention: string("mention")?,
            }),
            "tex" => Ok(Command::Tex {
                expression: string("expression")?
                    .ok_or(CommandError::MissingOption("expression"))?,
                spoiler: match option("spoiler") {
                    None | Some(Value::Null) => false,
                    Some(Value::Bool(b)) => *b,
                    Some(_) => return Err(CommandError::InvalidOption("spoiler")),
                },
                mention: string("mention")?,
            }),
            "Render TeX" => Ok(Command::RenderTex { content: message()? }),
            "Format Code" => Ok(Command::FormatCode {
                content: message()?,
                public: false,
            }),
            "Format Code (Public)" => Ok(Command::FormatCode {
                content: message()?,
                public: true,
            }),
            "info" => Ok(Command::Info),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

pub async fn run(state: &AppState, ctx: &Context, command: Command) -> Reply {
    match command {
        Command::Color { color, mention } => {
            color::color(state, ctx, &color, mention.as_deref()).await
        }
        Command::Tex {
            expression,
            spoiler,
            mention,
        } => tex::tex(state, ctx, &expression, spoiler, mention.as_deref()).await,
        Command::RenderTex { content } => tex::render_tex(state, ctx, &content).await,
        Command::FormatCode { content, public } => {
            format_code::format_code(state, ctx, &content, public)
        }
        Command::Info => info::info(state, ctx),
    }
}
