use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
use todo_shared::TaskId;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))?;
        Ok(Self {
            key: k.trim().to_string(),
            value: v.trim().to_string(),
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "todo",
    version,
    about = "Keep a short list of things to do",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(
        long = "rc",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append,
        global = true
    )]
    pub rc_overrides: Vec<KeyVal>,

    #[arg(long = "todorc", global = true)]
    pub todorc: Option<PathBuf>,

    #[arg(long = "data", global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show every task and the pending count
    List,
    /// Print only the pending count
    Count,
    /// Append a new task
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Flip a task between pending and completed
    #[command(visible_alias = "done")]
    Toggle { id: TaskId },
    /// Replace the text of a pending task
    Edit {
        id: TaskId,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Remove a task
    #[command(visible_alias = "rm")]
    Delete { id: TaskId },
    /// Remove every task after confirmation
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}

impl Command {
    /// The command run when none is given, from `default.command`.
    #[tracing::instrument(skip(cfg))]
    pub fn from_default(cfg: &Config) -> anyhow::Result<Self> {
        let name = cfg
            .get("default.command")
            .unwrap_or_else(|| "list".to_string());
        debug!(command = %name, "no explicit command, using default");
        match name.trim() {
            "list" => Ok(Self::List),
            "count" => Ok(Self::Count),
            other => Err(anyhow!(
                "unsupported default.command: {other} (expected list or count)"
            )),
        }
    }
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use todo_shared::TaskId;

    use super::{Command, GlobalCli};
    use crate::config::Config;

    #[test]
    fn parses_add_with_free_text() {
        let cli = GlobalCli::parse_from(["todo", "add", "Buy", "-2%", "milk"]);
        assert_eq!(
            cli.command,
            Some(Command::Add {
                text: vec!["Buy".into(), "-2%".into(), "milk".into()]
            })
        );
    }

    #[test]
    fn aliases_and_globals() {
        let cli = GlobalCli::parse_from(["todo", "done", "42", "-vv", "--rc", "color=off"]);
        assert_eq!(cli.command, Some(Command::Toggle { id: TaskId(42) }));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.rc_overrides[0].key, "color");
        assert_eq!(cli.rc_overrides[0].value, "off");

        let cli = GlobalCli::parse_from(["todo", "rm", "7"]);
        assert_eq!(cli.command, Some(Command::Delete { id: TaskId(7) }));
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert!(GlobalCli::try_parse_from(["todo", "toggle", "abc"]).is_err());
    }

    #[test]
    fn default_command_comes_from_config() {
        let mut cfg = Config::default();
        assert_eq!(Command::from_default(&cfg).expect("default"), Command::List);

        cfg.apply_overrides([("default.command".to_string(), "count".to_string())]);
        assert_eq!(Command::from_default(&cfg).expect("default"), Command::Count);

        cfg.apply_overrides([("default.command".to_string(), "purge".to_string())]);
        assert!(Command::from_default(&cfg).is_err());
    }
}
