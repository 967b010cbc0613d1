// Replay Configuration
//
// Command-line and environment settings for the `replay` binary. The library
// handlers take no configuration.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when RUST_LOG is unset
const DEFAULT_LOG_FILTER: &str = "info";

/// Command line of the `replay` binary. Each argument falls back to its
/// environment variable when not given on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "replay",
    about = "Replay MerkleRedeem events into an in-memory store",
    version
)]
pub struct ReplayConfig {
    /// Newline-delimited JSON events
    #[arg(env = "REPLAY_INPUT")]
    pub input: PathBuf,

    /// Where to write the bincode store snapshot
    #[arg(long, env = "REPLAY_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    /// Emit JSON log lines instead of human-readable text
    #[arg(long, env = "LOG_JSON", value_parser = clap::builder::BoolishValueParser::new())]
    pub log_json: bool,
}

/// Install the global tracing subscriber. Call once at startup.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_positional_input() {
        let config = ReplayConfig::try_parse_from(["replay", "events.jsonl"]).unwrap();

        assert_eq!(config.input, PathBuf::from("events.jsonl"));
        assert_eq!(config.snapshot, None);
        assert!(!config.log_json);
    }

    #[test]
    fn test_flags() {
        let config = ReplayConfig::try_parse_from([
            "replay",
            "events.jsonl",
            "--snapshot",
            "store.bin",
            "--log-json",
        ])
        .unwrap();

        assert_eq!(config.snapshot, Some(PathBuf::from("store.bin")));
        assert!(config.log_json);
    }

    #[test]
    fn test_help_is_not_an_input_path() {
        let err = ReplayConfig::try_parse_from(["replay", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let err = ReplayConfig::try_parse_from(["replay", "events.jsonl", "--follow"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_env_names() {
        let command = <ReplayConfig as clap::CommandFactory>::command();
        let env_of = |id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .map(|env| env.to_string_lossy().into_owned())
        };

        assert_eq!(env_of("input").as_deref(), Some("REPLAY_INPUT"));
        assert_eq!(env_of("snapshot").as_deref(), Some("REPLAY_SNAPSHOT"));
        assert_eq!(env_of("log_json").as_deref(), Some("LOG_JSON"));
    }
}
