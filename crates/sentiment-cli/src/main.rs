use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sentiment_batch::{handle_batch, parse_batch_input, TextItem, DEFAULT_LANG};
use sentiment_rules::explain;
use sentiment_rules::topics::topics;
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// sentiment – offline rule-based polarity for short Vietnamese text.
/// Commands:
///   - score --text "..."        (or text on STDIN)
///   - batch --input items.jsonl
///   - topics --text "..."
///   - explain / tokens (debug)
#[derive(Parser, Debug)]
#[command(name = "sentiment", version, about = "Rule-based pos/neg/neu scoring")]
struct Cli {
    /// Write the JSON result to this file instead of STDOUT
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score one text
    Score {
        /// The text; read from STDIN when absent
        #[arg(long)]
        text: Option<String>,
        #[arg(long, default_value = "0")]
        id: String,
        #[arg(long, default_value = DEFAULT_LANG)]
        lang: String,
    },

    /// Score a `{"items": [...]}` document or a JSONL file of items
    Batch {
        /// Input file; `-` reads STDIN
        #[arg(long)]
        input: PathBuf,
    },

    /// Tag damage types, relief items and trend tokens
    Topics {
        #[arg(long)]
        text: Option<String>,
    },

    /// (Debug) Show every scoring stage for a text
    Explain {
        #[arg(long)]
        text: Option<String>,
    },

    /// (Debug) Show the normalized text and its tokens
    Tokens {
        #[arg(long)]
        text: Option<String>,
    },
}

#[derive(Serialize)]
struct TokensOut {
    normalized: String,
    tokens: Vec<String>,
}

fn read_stdin_string() -> Result<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf).context("failed reading STDIN")?;
    Ok(buf)
}

fn text_or_stdin(text: Option<String>) -> Result<String> {
    match text {
        Some(t) => Ok(t),
        None => read_stdin_string(),
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        return read_stdin_string();
    }
    fs::read_to_string(path).with_context(|| format!("failed reading input: {}", path.display()))
}

fn emit<T: Serialize>(out: Option<&Path>, value: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value)?;
    match out {
        Some(p) => {
            if let Some(dir) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)
                    .with_context(|| format!("failed creating {}", dir.display()))?;
            }
            fs::write(p, pretty).with_context(|| format!("failed writing {}", p.display()))?;
            eprintln!("✓ wrote {}", p.display());
        }
        None => println!("{pretty}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let out = cli.out.as_deref();

    match cli.cmd {
        Commands::Score { text, id, lang } => {
            let item = TextItem { id, text: Some(text_or_stdin(text)?), lang: Some(lang) };
            emit(out, &sentiment_batch::score_item(&item))?;
        }

        Commands::Batch { input } => {
            let raw = read_input(&input)?;
            let req = parse_batch_input(&raw)
                .with_context(|| format!("failed parsing batch: {}", input.display()))?;
            tracing::info!(items = req.items.len(), "batch loaded");
            emit(out, &handle_batch(&req))?;
        }

        Commands::Topics { text } => {
            let txt = text_or_stdin(text)?;
            emit(out, &topics(&txt))?;
        }

        // ----- DEBUG ROUTES -----
        Commands::Explain { text } => {
            let txt = text_or_stdin(text)?;
            emit(out, &explain(&txt))?;
        }

        Commands::Tokens { text } => {
            let txt = text_or_stdin(text)?;
            let normalized = text_normalize::normalize(&txt);
            let tokens = text_normalize::tokenize(&normalized);
            emit(out, &TokensOut { normalized, tokens })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiment_batch::BatchResponse;
    use sentiment_rules::{Label, SentimentResult};

    fn run_args(args: &[&str]) -> Result<()> {
        run(Cli::try_parse_from(args)?)
    }

    fn read_json(path: &Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn text_flag_skips_stdin() {
        assert_eq!(text_or_stdin(Some("rat tot".into())).unwrap(), "rat tot");
    }

    #[test]
    fn score_writes_out_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("score.json");
        let out_s = out.to_str().unwrap();
        run_args(&["sentiment", "score", "--text", "san pham rat tot!!", "--id", "7", "--out", out_s])
            .unwrap();

        let r: SentimentResult = serde_json::from_value(read_json(&out)).unwrap();
        assert_eq!(r.id, "7");
        assert_eq!(r.label, Label::Pos);
    }

    #[test]
    fn batch_reads_jsonl_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("items.jsonl");
        fs::write(&input, "{\"id\":\"a\",\"text\":\"xau\"}\n{\"id\":\"b\",\"text\":\"vui\"}\n").unwrap();
        let out = dir.path().join("batch.json");
        run_args(&[
            "sentiment", "batch",
            "--input", input.to_str().unwrap(),
            "--out", out.to_str().unwrap(),
        ])
        .unwrap();

        let resp: BatchResponse = serde_json::from_value(read_json(&out)).unwrap();
        let labels: Vec<Label> = resp.items.iter().map(|r| r.label).collect();
        assert_eq!(labels, [Label::Neg, Label::Pos]);
    }

    #[test]
    fn batch_reports_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.jsonl");
        fs::write(&input, "not json").unwrap();
        let err = run_args(&["sentiment", "batch", "--input", input.to_str().unwrap()]).unwrap_err();
        assert!(err.to_string().contains("failed parsing batch"));
    }

    #[test]
    fn missing_input_file_is_an_error() {
        assert!(run_args(&["sentiment", "batch", "--input", "/nonexistent/items.jsonl"]).is_err());
    }

    #[test]
    fn topics_and_tokens_routes() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("topics.json");
        run_args(&["sentiment", "topics", "--text", "Cần gạo, nhà sập", "--out", out.to_str().unwrap()])
            .unwrap();
        let v = read_json(&out);
        assert_eq!(v["damage_types"], serde_json::json!(["housing_damage"]));
        assert_eq!(v["relief_items"], serde_json::json!(["food"]));

        let out = dir.path().join("tokens.json");
        run_args(&["sentiment", "tokens", "--text", "Rất TỐT!", "--out", out.to_str().unwrap()])
            .unwrap();
        let v = read_json(&out);
        assert_eq!(v["normalized"], "rat tot!");
        assert_eq!(v["tokens"], serde_json::json!(["rat", "tot"]));
    }
}
