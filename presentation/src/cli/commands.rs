//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use council_application::CouncilSettings;
use council_domain::{CouncilRequest, ProviderId, Question, ResponseMode};
use std::path::PathBuf;

/// Output format for council answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the synthesis (or debate transcript)
    Text,
    /// Every provider's answer, errors and metadata
    Full,
    /// The raw response as JSON
    Json,
}

/// CLI arguments for ai-council
#[derive(Parser, Debug)]
#[command(name = "ai-council")]
#[command(author, version, about = "AI Council - ask several LLM providers at once")]
#[command(long_about = r#"
AI Council sends one question to several text-generation providers in
parallel and folds their answers into a synthesis, a debate transcript,
or the raw per-provider responses.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./council.toml      Project-level config
3. ~/.config/ai-council/config.toml   Global config
COUNCIL_* environment variables override all of them.

Example:
  ai-council ask "What causes rain?"
  ai-council ask -p claude -p mistral --mode debate "Tabs or spaces?"
  ai-council serve --port 8080
  ai-council mcp
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask the council a question
    Ask(AskArgs),
    /// List providers and whether they are configured
    Models,
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Serve the council as MCP tools over stdio
    Mcp,
    /// Show configuration file locations and the effective settings
    Config,
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question to ask
    pub question: String,

    /// Providers to consult (can be specified multiple times)
    #[arg(short, long = "provider", value_name = "PROVIDER")]
    pub providers: Vec<ProviderId>,

    /// Response mode: synthesis, detailed or debate
    #[arg(short, long, default_value = "synthesis")]
    pub mode: ResponseMode,

    /// Sampling temperature (0.0 - 2.0)
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Output token cap per provider
    #[arg(long, value_name = "N")]
    pub max_tokens: Option<u32>,

    /// Send the question verbatim, without provider prompt templates
    #[arg(long)]
    pub no_optimize: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

impl AskArgs {
    /// Build a request, filling unset values from `settings`.
    ///
    /// The result is not validated.
    pub fn to_request(&self, settings: &CouncilSettings) -> CouncilRequest {
        let providers = if self.providers.is_empty() {
            settings.default_providers.clone()
        } else {
            self.providers.clone()
        };

        let mut request = CouncilRequest::new(Question::new(self.question.clone()))
            .with_mode(self.mode)
            .with_providers(providers)
            .with_temperature(self.temperature.unwrap_or(settings.default_temperature));

        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }
        if self.no_optimize {
            request = request.without_optimization();
        }
        request
    }
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Bind address (defaults to server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Port (defaults to server.port)
    #[arg(long)]
    pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn ask_args(cli: Cli) -> AskArgs {
        match cli.command {
            Command::Ask(args) => args,
            other => panic!("expected ask, got {:?}", other),
        }
    }

    #[test]
    fn test_ask_defaults_come_from_settings() {
        let args = ask_args(parse(&["ai-council", "ask", "What causes rain?"]));
        let settings = CouncilSettings::default()
            .with_default_providers(vec![ProviderId::Mistral])
            .with_default_temperature(0.3);

        let request = args.to_request(&settings);
        assert_eq!(request.question.content(), "What causes rain?");
        assert_eq!(request.providers, vec![ProviderId::Mistral]);
        assert_eq!(request.temperature, 0.3);
        assert_eq!(request.mode, ResponseMode::Synthesis);
        assert!(request.optimize_prompts);
        assert!(request.max_tokens.is_none());
        assert_eq!(args.output, OutputFormat::Text);
    }

    #[test]
    fn test_ask_flags() {
        let args = ask_args(parse(&[
            "ai-council",
            "ask",
            "-p",
            "claude",
            "--provider",
            "gpt4",
            "--mode",
            "debate",
            "--temperature",
            "1.2",
            "--max-tokens",
            "500",
            "--no-optimize",
            "--output",
            "json",
            "Tabs or spaces?",
        ]));

        let request = args.to_request(&CouncilSettings::default());
        assert_eq!(request.providers, vec![ProviderId::Claude, ProviderId::Gpt4]);
        assert_eq!(request.mode, ResponseMode::Debate);
        assert_eq!(request.temperature, 1.2);
        assert_eq!(request.max_tokens, Some(500));
        assert!(!request.optimize_prompts);
        assert_eq!(args.output, OutputFormat::Json);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["ai-council", "ask", "--mode", "poem", "q"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["ai-council", "serve", "--port", "9000", "-vv", "--no-config"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_config);
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.port, Some(9000));
                assert!(args.host.is_none());
            }
            other => panic!("expected serve, got {:?}", other),
        }
    }

    #[test]
    fn test_mcp_subcommand() {
        let cli = parse(&["ai-council", "mcp", "-v"]);
        assert!(matches!(cli.command, Command::Mcp));
        assert_eq!(cli.verbose, 1);
    }
}
