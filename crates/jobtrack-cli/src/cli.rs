//! Argument parsing and command dispatch.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use jobtrack_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
use reqwest::Url;
use tracing::info;
use uuid::Uuid;

use crate::client::{AppContext, CliResult, parse_url};
use crate::commands::applications::{Intent, handle_status, handle_toggle};

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_LOGIN_PATH: &str = "/login";

/// Parses CLI arguments, executes the requested command and reports failures.
/// Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    run_with(cli).await
}

async fn run_with(cli: Cli) -> i32 {
    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format,
        build_sha: option_env!("JOBTRACK_BUILD_SHA").unwrap_or("dev"),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err}");
    }

    let trace_id = Uuid::new_v4().to_string();
    info!(
        trace_id = %trace_id,
        build_sha = build_sha(),
        command = cli.command.label(),
        "starting command"
    );

    match dispatch(cli, &trace_id).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(cli: Cli, trace_id: &str) -> CliResult<()> {
    let ctx = AppContext::new(
        cli.api_url,
        cli.token,
        &cli.login_path,
        Duration::from_secs(cli.timeout),
        trace_id,
    )?;

    match cli.command {
        Command::Status(args) => handle_status(&ctx, args.job_id, cli.output).await,
        Command::Toggle(args) => handle_toggle(&ctx, args.job_id, Intent::Toggle, cli.output).await,
        Command::Apply(args) => handle_toggle(&ctx, args.job_id, Intent::Apply, cli.output).await,
        Command::Withdraw(args) => {
            handle_toggle(&ctx, args.job_id, Intent::Withdraw, cli.output).await
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "jobtrack",
    about = "Apply to and withdraw from job postings tracked by a Jobtrack server"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "JOBTRACK_API_URL",
        value_parser = parse_url,
        default_value = DEFAULT_API_URL
    )]
    api_url: Url,
    #[arg(long, global = true, env = "JOBTRACK_TOKEN", hide_env_values = true)]
    token: Option<String>,
    #[arg(
        long,
        global = true,
        env = "JOBTRACK_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    timeout: u64,
    #[arg(
        long,
        global = true,
        env = "JOBTRACK_LOGIN_PATH",
        default_value = DEFAULT_LOGIN_PATH
    )]
    login_path: String,
    #[arg(
        long,
        global = true,
        env = "JOBTRACK_LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL
    )]
    log_level: String,
    #[arg(
        long,
        global = true,
        value_parser = parse_log_format,
        default_value = "pretty",
        help = "Log output format: pretty or json"
    )]
    log_format: LogFormat,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Select output format for command results"
    )]
    output: OutputFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show whether you have applied to a job.
    Status(JobArgs),
    /// Flip the application state of a job.
    Toggle(JobArgs),
    /// Apply to a job; no-op when already applied.
    Apply(JobArgs),
    /// Withdraw an application; no-op when not applied.
    Withdraw(JobArgs),
}

impl Command {
    const fn label(&self) -> &'static str {
        match self {
            Self::Status(_) => "status",
            Self::Toggle(_) => "toggle",
            Self::Apply(_) => "apply",
            Self::Withdraw(_) => "withdraw",
        }
    }
}

#[derive(Args, Debug)]
struct JobArgs {
    /// Identifier of the job posting.
    job_id: i64,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn parse_log_format(input: &str) -> Result<LogFormat, String> {
    input.parse::<LogFormat>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::MockServer;
    use httpmock::prelude::*;
    use jobtrack_test_support::fixtures::job_json;

    #[test]
    fn defaults_apply_without_flags() {
        let cli = Cli::try_parse_from(["jobtrack", "status", "42"]).expect("parse");
        assert_eq!(cli.api_url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(cli.timeout, DEFAULT_TIMEOUT_SECS);
        assert_eq!(cli.login_path, "/login");
        assert_eq!(cli.output, OutputFormat::Text);
        assert!(matches!(cli.command, Command::Status(JobArgs { job_id: 42 })));
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "jobtrack",
            "apply",
            "7",
            "--output",
            "json",
            "--token",
            "abc",
            "--log-format",
            "json",
        ])
        .expect("parse");
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.token.as_deref(), Some("abc"));
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.command.label(), "apply");
    }

    #[test]
    fn log_format_defaults_to_pretty_and_rejects_unknown_names() {
        let cli = Cli::try_parse_from(["jobtrack", "status", "1"]).expect("parse");
        assert_eq!(cli.log_format, LogFormat::Pretty);
        let text = Cli::try_parse_from(["jobtrack", "--log-format", "text", "status", "1"])
            .expect("parse");
        assert_eq!(text.log_format, LogFormat::Pretty);
        let err = Cli::try_parse_from(["jobtrack", "--log-format", "xml", "status", "1"])
            .expect_err("unknown format should fail");
        assert!(err.to_string().contains("unknown log format 'xml'"));
    }

    #[test]
    fn rejects_invalid_api_url_and_job_id() {
        assert!(Cli::try_parse_from(["jobtrack", "--api-url", "nope", "status", "1"]).is_err());
        assert!(Cli::try_parse_from(["jobtrack", "status", "abc"]).is_err());
    }

    #[tokio::test]
    async fn run_with_returns_zero_on_success() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/jobs/5");
            then.status(200).json_body(job_json(5, None));
        });
        let base_url = server.base_url();
        let cli = Cli::try_parse_from([
            "jobtrack",
            "--api-url",
            base_url.as_str(),
            "--token",
            "t",
            "status",
            "5",
        ])
        .expect("parse");
        assert_eq!(run_with(cli).await, 0);
    }

    #[tokio::test]
    async fn run_with_maps_blank_token_to_validation_exit() {
        let cli = Cli::try_parse_from(["jobtrack", "--token", "  ", "status", "5"]).expect("parse");
        assert_eq!(run_with(cli).await, 2);
    }
}
