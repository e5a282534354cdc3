//! # Catalog Subcommand
//!
//! Inspect and validate policy catalogs.
//!
//! ## Usage
//!
//! ```bash
//! # Print the built-in catalog as YAML:
//! spendpol catalog show
//!
//! # One tier of a custom catalog, as JSON:
//! spendpol catalog show --catalog policy.yaml --tier "Senior Management" --format json
//!
//! # Validate a catalog file before deploying it:
//! spendpol catalog check policy.yaml
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};

use spendpol_core::{PolicyCatalog, Subcategory, Tier};
use spendpol_engine::EngineConfig;

use crate::{resolve_catalog, EXIT_NOT_ACCEPTED};

/// Catalog subcommand arguments.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

/// Available catalog subcommands.
#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// Print a catalog.
    Show {
        /// Catalog file. Defaults to the configured or built-in catalog.
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Only this tier (label or identifier).
        #[arg(long)]
        tier: Option<String>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },

    /// Parse and validate a catalog file.
    Check {
        /// Catalog file (YAML or JSON).
        path: PathBuf,
    },
}

/// Rendering for `catalog show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// Execute the catalog subcommand.
pub fn run_catalog(args: &CatalogArgs, config: &EngineConfig) -> Result<u8> {
    match &args.command {
        CatalogCommand::Show {
            catalog,
            tier,
            format,
        } => run_show(catalog.as_deref(), tier.as_deref(), *format, config),
        CatalogCommand::Check { path } => run_check(path),
    }
}

fn run_show(
    catalog: Option<&Path>,
    tier: Option<&str>,
    format: OutputFormat,
    config: &EngineConfig,
) -> Result<u8> {
    let mut catalog = resolve_catalog(catalog, config)?;
    if let Some(raw) = tier {
        let tier: Tier = raw.parse().with_context(|| format!("invalid --tier: {raw}"))?;
        if !catalog.contains_tier(tier) {
            anyhow::bail!("tier '{tier}' is not defined in the catalog");
        }
        catalog = catalog.restricted_to(tier);
    }
    print!("{}", render(&catalog, format)?);
    Ok(0)
}

fn render(catalog: &PolicyCatalog, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => catalog.to_yaml_string().context("failed to render catalog"),
        OutputFormat::Json => serde_json::to_string_pretty(catalog)
            .map(|json| format!("{json}\n"))
            .context("failed to render catalog"),
    }
}

fn run_check(path: &Path) -> Result<u8> {
    let catalog = match PolicyCatalog::load(path) {
        Ok(catalog) => catalog,
        Err(e) => {
            println!("FAIL: {}: {e}", path.display());
            return Ok(EXIT_NOT_ACCEPTED);
        }
    };

    let cells: usize = catalog
        .tiers()
        .filter_map(|tier| catalog.tier_policy(tier))
        .map(|policy| policy.len())
        .sum();
    println!(
        "OK: {} ({} tier(s), {} limit(s))",
        path.display(),
        catalog.tiers().count(),
        cells
    );

    for note in coverage_notes(&catalog) {
        println!("  note: {note}");
    }
    Ok(0)
}

/// Gaps that change how receipts evaluate: absent tiers and, per present
/// tier, the policy lines that deny by default.
fn coverage_notes(catalog: &PolicyCatalog) -> Vec<String> {
    let mut notes = Vec::new();
    for tier in Tier::all() {
        if !catalog.contains_tier(*tier) {
            notes.push(format!(
                "tier '{tier}' is absent; its receipts are reported as an unknown employee level"
            ));
        }
    }
    for tier in catalog.tiers() {
        let missing: Vec<String> = Subcategory::all()
            .iter()
            .filter(|sub| catalog.get(tier, **sub).is_none())
            .map(|sub| format!("{} / {}", sub.category().label(), sub.label()))
            .collect();
        if !missing.is_empty() {
            notes.push(format!(
                "tier '{tier}' has no limit for {}; tagged expenses are denied",
                missing.join(", ")
            ));
        }
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(body: &str) -> u8 {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(&path, body).unwrap();
        run_check(&path).unwrap()
    }

    #[test]
    fn check_accepts_valid_catalog() {
        assert_eq!(
            check("executive:\n  Travel.BusinessTrips: {min: 0, max: 10}\n"),
            0
        );
    }

    #[test]
    fn check_rejects_inverted_range() {
        assert_eq!(
            check("staff:\n  Travel.BusinessTrips: {min: 10, max: 1}\n"),
            EXIT_NOT_ACCEPTED
        );
    }

    #[test]
    fn check_rejects_unknown_subcategory() {
        assert_eq!(check("staff:\n  Travel.Yachts: unlimited\n"), EXIT_NOT_ACCEPTED);
    }

    #[test]
    fn notes_name_absent_tiers_and_undefined_lines() {
        let catalog = PolicyCatalog::from_yaml_str(
            "staff:\n  Travel.BusinessTrips: { max: 160000 }\n  Accommodation.HotelStays: unlimited\n",
        )
        .unwrap();
        let notes = coverage_notes(&catalog);
        assert_eq!(notes.len(), 6);
        assert_eq!(
            notes[0],
            "tier 'Executive Level' is absent; its receipts are reported as an unknown employee level"
        );
        let staff = &notes[5];
        assert!(staff.starts_with("tier 'Staff & Employees' has no limit for "));
        assert!(staff.contains("Travel Expenses / Mileage Reimbursement"));
        assert!(staff.contains("Communication Expenses / Mobile/Internet Bills"));
        assert!(!staff.contains("Business Trips"));
        assert!(!staff.contains("Hotel Stays"));
    }

    #[test]
    fn complete_tier_has_no_notes() {
        let catalog = Subcategory::all().iter().fold(PolicyCatalog::new(), |c, sub| {
            Tier::all().iter().fold(c, |c, tier| {
                c.with_limit(*tier, *sub, spendpol_core::LimitDescriptor::Unlimited)
            })
        });
        assert!(coverage_notes(&catalog).is_empty());
    }

    #[test]
    fn check_missing_file_fails() {
        assert_eq!(
            run_check(Path::new("/nonexistent/catalog.yaml")).unwrap(),
            EXIT_NOT_ACCEPTED
        );
    }

    #[test]
    fn standard_catalog_renders_in_both_formats() {
        let catalog = PolicyCatalog::standard();
        let yaml = render(&catalog, OutputFormat::Yaml).unwrap();
        assert_eq!(PolicyCatalog::from_yaml_str(&yaml).unwrap(), catalog);
        let json = render(&catalog, OutputFormat::Json).unwrap();
        assert_eq!(PolicyCatalog::from_yaml_str(&json).unwrap(), catalog);
    }

    #[test]
    fn show_unknown_tier_is_error() {
        let err = run_show(None, Some("Intern"), OutputFormat::Yaml, &EngineConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("--tier"));
    }

    #[test]
    fn show_single_tier() {
        assert_eq!(
            run_show(None, Some("team_lead"), OutputFormat::Json, &EngineConfig::default())
                .unwrap(),
            0
        );
    }
}
