//! # Evaluate Subcommand
//!
//! Runs receipts through the policy engine and writes the annotated JSON.
//!
//! ## Usage
//!
//! ```bash
//! # Evaluate a file, print annotated JSON to stdout:
//! spendpol evaluate receipts.json
//!
//! # Read stdin, write to a file, pin the clock, print a tally to stderr:
//! cat receipts.json | spendpol evaluate - --out checked.json \
//!     --now 2026-03-01T00:00:00Z --summary
//!
//! # Evaluate a large batch across worker threads with a custom catalog:
//! spendpol evaluate batch.json --parallel --catalog policy/catalog.yaml
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use spendpol_core::Timestamp;
use spendpol_engine::{EngineConfig, PolicyEngine};

use crate::{resolve_catalog, EXIT_NOT_ACCEPTED};

/// Arguments for `spendpol evaluate`.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Receipt JSON file (one object or an array). `-` reads stdin.
    pub input: PathBuf,

    /// Write annotated JSON here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Policy catalog file (YAML or JSON). Overrides the config file.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Evaluation time (RFC 3339). Defaults to the current time.
    #[arg(long)]
    pub now: Option<String>,

    /// Spread records across worker threads.
    #[arg(long)]
    pub parallel: bool,

    /// Print a one-line tally to stderr.
    #[arg(long)]
    pub summary: bool,
}

/// Execute the evaluate subcommand.
pub fn run_evaluate(args: &EvaluateArgs, config: &EngineConfig) -> Result<u8> {
    let catalog = resolve_catalog(args.catalog.as_deref(), config)?;
    let engine = PolicyEngine::new(Arc::new(catalog), config.clone());

    let now = match &args.now {
        Some(raw) => Timestamp::parse_lenient(raw)
            .with_context(|| format!("invalid --now timestamp: {raw}"))?,
        None => Timestamp::now(),
    };

    let input = read_input(&args.input)?;
    let report = engine
        .evaluate_batch_at(input, now, args.parallel)
        .context("evaluation failed")?;

    let rendered =
        serde_json::to_string_pretty(&report.output).context("failed to serialize output")?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("failed to write output: {}", path.display()))?;
            tracing::info!(path = %path.display(), "annotated receipts written");
        }
        None => println!("{rendered}"),
    }

    if args.summary {
        eprintln!("{}", report.summary);
    }

    Ok(if report.summary.all_accepted() {
        0
    } else {
        EXIT_NOT_ACCEPTED
    })
}

fn read_input(path: &Path) -> Result<Value> {
    let text = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input: {}", path.display()))?
    };
    serde_json::from_str(&text)
        .with_context(|| format!("input is not valid JSON: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOW: &str = "2026-03-01T00:00:00Z";

    fn args(input: PathBuf, out: PathBuf) -> EvaluateArgs {
        EvaluateArgs {
            input,
            out: Some(out),
            catalog: None,
            now: Some(NOW.to_string()),
            parallel: false,
            summary: false,
        }
    }

    fn receipt(amount: &str) -> Value {
        json!({
            "bill": {
                "totalAmount": {"$numberInt": amount},
                "date": {"$date": "2026-02-27T10:00:00Z"}
            },
            "employeeLevel": "Staff & Employees",
            "items": [{"name": "Office chair"}]
        })
    }

    fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
        path
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn accepted_receipt_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_json(dir.path(), "in.json", &receipt("100"));
        let out = dir.path().join("out.json");

        let code = run_evaluate(&args(input, out.clone()), &EngineConfig::default()).unwrap();
        assert_eq!(code, 0);
        let written = read_json(&out);
        assert_eq!(written["status"], json!("Accepted"));
        assert_eq!(written["violations"], json!([]));
    }

    #[test]
    fn rejected_batch_exits_two_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_json(
            dir.path(),
            "in.json",
            &json!([receipt("100"), receipt("200000"), {"note": "no bill"}]),
        );
        let out = dir.path().join("out.json");

        let mut a = args(input, out.clone());
        a.parallel = true;
        let code = run_evaluate(&a, &EngineConfig::default()).unwrap();
        assert_eq!(code, EXIT_NOT_ACCEPTED);

        let written = read_json(&out);
        let records = written.as_array().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["status"], json!("Accepted"));
        assert_eq!(records[1]["status"], json!("Rejected"));
        assert!(records[2].get("status").is_none());
        assert_eq!(records[2]["note"], json!("no bill"));
    }

    #[test]
    fn custom_catalog_flag_applies() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = dir.path().join("catalog.yaml");
        std::fs::write(&catalog, "staff:\n  Travel.BusinessTrips: unlimited\n").unwrap();
        let input = write_json(dir.path(), "in.json", &receipt("200000"));
        let out = dir.path().join("out.json");

        let mut a = args(input, out.clone());
        a.catalog = Some(catalog);
        assert_eq!(run_evaluate(&a, &EngineConfig::default()).unwrap(), 0);
    }

    #[test]
    fn scalar_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_json(dir.path(), "in.json", &json!("receipt"));
        let err = run_evaluate(&args(input, dir.path().join("o.json")), &EngineConfig::default())
            .unwrap_err();
        assert!(format!("{err:#}").contains("type mismatch"));
    }

    #[test]
    fn invalid_json_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.json");
        std::fs::write(&input, "{not json").unwrap();
        assert!(run_evaluate(&args(input, dir.path().join("o.json")), &EngineConfig::default())
            .is_err());
    }

    #[test]
    fn invalid_now_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_json(dir.path(), "in.json", &receipt("1"));
        let mut a = args(input, dir.path().join("o.json"));
        a.now = Some("last tuesday".into());
        let err = run_evaluate(&a, &EngineConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--now"));
    }

    #[test]
    fn config_staleness_window_applies() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_json(dir.path(), "in.json", &receipt("100"));
        let out = dir.path().join("out.json");
        let config = EngineConfig {
            max_bill_age_days: 1,
            ..EngineConfig::default()
        };
        assert_eq!(
            run_evaluate(&args(input, out.clone()), &config).unwrap(),
            EXIT_NOT_ACCEPTED
        );
        assert_eq!(
            read_json(&out)["violations"],
            json!(["Violation: Bill date 2026-02-27 is older than 1 days."])
        );
    }
}
