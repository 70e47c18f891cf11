//! quill CLI binary: run the generate/reflect loop from the command line.
//!
//! Subcommands: `run` (default), `check` (ask each provider one question), `graph` (print the
//! loop topology).

mod log_format;
mod logging;

use std::path::{Path, PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand};
use cli::{
    check_providers, format_check_result, format_transcript, render_graph, run_reflection,
    transcript_json, GraphFormat, RunOptions, DEFAULT_CHECK_QUESTION, DEFAULT_TOPIC,
};
use quill::LlmProvider;

/// Default max chars per message in the `--verbose` display.
const DEFAULT_DISPLAY_MAX_LEN: usize = 200;

#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(about = "quill: draft a post, critique it, revise it")]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    cmd: Option<Command>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Run the reflection loop on a topic (default)
    Run(RunArgs),
    /// Ask each provider one question and print the answers
    Check(CheckArgs),
    /// Print the loop topology
    Graph(GraphArgs),
}

#[derive(ClapArgs, Debug, Clone, Default)]
struct ModelArgs {
    /// LLM provider: gemini, ollama, openai or mock (default: LLM_PROVIDER or gemini)
    #[arg(long, value_name = "PROVIDER")]
    provider: Option<LlmProvider>,

    /// Model name (default: LLM_MODEL or the provider default)
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,
}

#[derive(ClapArgs, Debug, Clone, Default)]
struct RunArgs {
    /// Topic (or pass it as positional words)
    #[arg(short, long, value_name = "TEXT")]
    message: Option<String>,

    /// Topic words when -m/--message is not used
    #[arg(trailing_var_arg = true)]
    rest: Vec<String>,

    #[command(flatten)]
    model: ModelArgs,

    /// End once the transcript holds more than N messages after a generation (default: 4)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    max_messages: Option<i64>,

    /// Fail after N node steps without finishing
    #[arg(long, value_name = "N")]
    recursion_limit: Option<usize>,

    /// Print node enter/exit to stderr while running
    #[arg(short, long)]
    verbose: bool,

    /// Output the transcript as JSON
    #[arg(long)]
    json: bool,

    /// With --json, write to this file instead of stdout
    #[arg(long, value_name = "PATH", requires = "json")]
    file: Option<PathBuf>,

    /// With --json, pretty-print
    #[arg(long, requires = "json")]
    pretty: bool,
}

#[derive(ClapArgs, Debug, Clone)]
struct CheckArgs {
    /// Question to ask
    #[arg(short, long, value_name = "TEXT", default_value = DEFAULT_CHECK_QUESTION)]
    message: String,

    /// Providers to check (repeatable; default: gemini and ollama)
    #[arg(long = "provider", value_name = "PROVIDER")]
    providers: Vec<LlmProvider>,

    /// Model for every checked provider (default: each provider's default)
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
struct GraphArgs {
    #[arg(long, value_enum, default_value_t = GraphFormat::Mermaid)]
    format: GraphFormat,

    /// Threshold shown on the end edge (default: REFLECTION_MAX_MESSAGES or 4)
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    max_messages: Option<i64>,
}

/// Reads the verbose display width from `QUILL_DISPLAY_MAX_LEN`. 0 means no truncation.
fn display_max_len() -> usize {
    std::env::var("QUILL_DISPLAY_MAX_LEN")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_DISPLAY_MAX_LEN)
}

fn topic_from(args: &RunArgs) -> String {
    args.message
        .clone()
        .or_else(|| (!args.rest.is_empty()).then(|| args.rest.join(" ")))
        .unwrap_or_else(|| DEFAULT_TOPIC.to_string())
}

fn run_options(args: &RunArgs) -> RunOptions {
    RunOptions {
        topic: topic_from(args),
        provider: args.model.provider,
        model: args.model.model.clone(),
        max_messages: args.max_messages,
        recursion_limit: args.recursion_limit,
        verbose: args.verbose,
        display_max_len: display_max_len(),
    }
}

/// Writes JSON to stdout or to the given file. When pretty is true, multi-line; else one line.
fn write_json_output(
    value: &serde_json::Value,
    file: Option<&Path>,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let s = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    match file {
        Some(path) => std::fs::write(path, format!("{}\n", s))?,
        None => println!("{}", s),
    }
    Ok(())
}

async fn cmd_run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let opts = run_options(&args);
    let state = run_reflection(&opts).await?;
    if args.json {
        write_json_output(
            &transcript_json(&opts.topic, &state),
            args.file.as_deref(),
            args.pretty,
        )?;
    } else {
        print!("{}", format_transcript(&state));
    }
    Ok(())
}

async fn cmd_check(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let providers = if args.providers.is_empty() {
        vec![LlmProvider::Gemini, LlmProvider::Ollama]
    } else {
        args.providers
    };
    let results = check_providers(&providers, args.model.as_deref(), &args.message).await;
    for (i, r) in results.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", format_check_result(r));
    }
    let failed = results.iter().filter(|r| !r.is_ok()).count();
    if failed > 0 {
        return Err(format!("{} of {} providers failed", failed, results.len()).into());
    }
    Ok(())
}

fn cmd_graph(args: GraphArgs) -> Result<(), Box<dyn std::error::Error>> {
    let opts = RunOptions {
        max_messages: args.max_messages,
        ..RunOptions::default()
    };
    print!("{}", render_graph(&opts, args.format)?);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_and_apply(config::APP_NAME, None) {
        eprintln!("quill: config: {}", e);
    }
    if let Err(e) = logging::init() {
        eprintln!("quill: logging: {}", e);
    }

    let args = Args::parse();
    let result = match args.cmd {
        Some(Command::Run(run)) => cmd_run(run).await,
        Some(Command::Check(check)) => cmd_check(check).await,
        Some(Command::Graph(graph)) => cmd_graph(graph),
        None => cmd_run(args.run).await,
    };
    if let Err(e) = result {
        eprintln!("quill: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn bare_words_become_the_topic() {
        let args = parse(&["quill", "Rust", "in", "2026"]);
        assert!(args.cmd.is_none());
        assert_eq!(topic_from(&args.run), "Rust in 2026");
    }

    #[test]
    fn message_flag_wins_and_default_topic_applies() {
        let args = parse(&["quill", "-m", "edge AI"]);
        assert_eq!(topic_from(&args.run), "edge AI");
        let args = parse(&["quill"]);
        assert_eq!(topic_from(&args.run), DEFAULT_TOPIC);
    }

    #[test]
    fn run_subcommand_parses_flags() {
        let args = parse(&[
            "quill",
            "run",
            "--provider",
            "ollama",
            "--model",
            "mistral:latest",
            "--max-messages",
            "6",
            "--recursion-limit",
            "20",
            "-v",
            "topic",
        ]);
        let Some(Command::Run(run)) = args.cmd else {
            panic!("expected run subcommand");
        };
        let opts = run_options(&run);
        assert_eq!(opts.provider, Some(LlmProvider::Ollama));
        assert_eq!(opts.model.as_deref(), Some("mistral:latest"));
        assert_eq!(opts.max_messages, Some(6));
        assert_eq!(opts.recursion_limit, Some(20));
        assert!(opts.verbose);
        assert_eq!(opts.topic, "topic");
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert!(Args::try_parse_from(["quill", "--provider", "bard", "x"]).is_err());
    }

    #[test]
    fn file_requires_json() {
        assert!(Args::try_parse_from(["quill", "--file", "out.json", "x"]).is_err());
        assert!(Args::try_parse_from(["quill", "--json", "--file", "out.json", "x"]).is_ok());
    }

    #[test]
    fn check_defaults_to_capital_question() {
        let args = parse(&["quill", "check"]);
        let Some(Command::Check(check)) = args.cmd else {
            panic!("expected check subcommand");
        };
        assert_eq!(check.message, DEFAULT_CHECK_QUESTION);
        assert!(check.providers.is_empty());
    }

    #[test]
    fn graph_format_parses() {
        let args = parse(&["quill", "graph", "--format", "dot"]);
        let Some(Command::Graph(graph)) = args.cmd else {
            panic!("expected graph subcommand");
        };
        assert_eq!(graph.format, GraphFormat::Dot);
    }

    #[test]
    fn json_output_goes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json_output(&serde_json::json!({ "ok": true }), Some(&path), false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"ok\":true}\n");
    }
}
