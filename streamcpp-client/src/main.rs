//! streamcpp CLI entry point.
//!
//! Sends one StreamCpp completion request for the given file text and
//! prints the reassembled completion.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use tracing_subscriber::EnvFilter;

use streamcpp_client::{
    Completion, Credentials, FileContext, Settings, StreamCppClient, build_request,
};

/// Send a StreamCpp request with the given file text.
#[derive(Debug, Parser)]
#[command(name = "streamcpp")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("source").required(true)))]
struct Cli {
    /// Logical filename sent to the service (e.g. app.py).
    #[arg(long)]
    file: String,

    /// Inline file text. Use --text-file to load from disk instead.
    #[arg(long, group = "source")]
    text: Option<String>,

    /// Path to a file whose contents are sent to the service.
    #[arg(long, group = "source")]
    text_file: Option<PathBuf>,

    /// Language id to send.
    #[arg(long, default_value = "python")]
    language: String,

    /// Zero-based cursor line.
    #[arg(long, default_value_t = 0)]
    cursor_line: i32,

    /// Zero-based cursor column.
    #[arg(long, default_value_t = 0)]
    cursor_col: i32,

    /// Service base URL.
    #[arg(long, env = "STREAMCPP_BASE_URL", default_value = streamcpp_client::DEFAULT_BASE_URL)]
    base_url: String,

    /// Path to settings.toml (default: user config directory).
    #[arg(long, env = "STREAMCPP_SETTINGS")]
    settings: Option<PathBuf>,

    /// Log decoded frames as they arrive.
    #[arg(long)]
    debug_frames: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.debug_frames {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let text = match (&cli.text, &cli.text_file) {
        (_, Some(path)) => std::fs::read_to_string(path)?,
        (Some(text), None) => unescape_cli_text(text),
        (None, None) => return Err("provide --text or --text-file".into()),
    };

    let settings = match &cli.settings {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    let credentials = Credentials::resolve(&settings)?;

    let client = StreamCppClient::builder(credentials)
        .base_url(cli.base_url)
        .build()?;

    let workspace_root = std::env::current_dir()?.display().to_string();
    let ctx = FileContext {
        path: cli.file,
        contents: text,
        language_id: cli.language,
        cursor_line: cli.cursor_line,
        cursor_col: cli.cursor_col,
        workspace_root,
    };

    match client.completion(&build_request(&ctx)).await {
        Ok(completion) => {
            print_completion(&completion);
            Ok(())
        }
        Err(err) => {
            // Frames received before the failure are still worth printing.
            if !err.partial.text.is_empty() {
                print_completion(&err.partial);
            }
            Err(err.into())
        }
    }
}

fn print_completion(completion: &Completion) {
    println!("{}", completion.text);
    if let Some(trailer) = &completion.trailer {
        println!("\n[trailer]\n{trailer}");
    }
    if let Some(leftover) = &completion.leftover {
        println!("\n[leftover bytes]\n{}", hex(leftover));
    }
}

/// Allow a literal `\n` in shell arguments: when the text contains the
/// two-character sequence but no real newline, treat it as an escape.
fn unescape_cli_text(text: &str) -> String {
    if text.contains("\\n") && !text.contains('\n') {
        text.replace("\\n", "\n")
    } else {
        text.to_string()
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_cli_text() {
        assert_eq!(unescape_cli_text("a\\nb"), "a\nb");
        // Real newlines present: leave the escapes alone.
        assert_eq!(unescape_cli_text("a\\nb\nc"), "a\\nb\nc");
        assert_eq!(unescape_cli_text("plain"), "plain");
    }

    #[test]
    fn test_hex() {
        assert_eq!(hex(&[0x00, 0xAB, 0x10]), "00ab10");
        assert_eq!(hex(&[]), "");
    }

    #[test]
    fn test_cli_requires_text_source() {
        use clap::CommandFactory;
        let result = Cli::command().try_get_matches_from(["streamcpp", "--file", "app.py"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["streamcpp", "--file", "app.py", "--text", "x = 1"]);
        assert_eq!(cli.language, "python");
        assert_eq!(cli.cursor_line, 0);
        assert_eq!(cli.cursor_col, 0);
        assert!(!cli.debug_frames);
    }
}
