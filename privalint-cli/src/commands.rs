use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Args};
use colored::*;
use privalint_analyzer::runner;
use privalint_ontology::OntologySet;
use std::path::{Path, PathBuf};

/// Analyze upstream extraction files into contradiction reports.
#[derive(Args)]
#[command(group(ArgGroup::new("mode").required(true).args(["single", "batch"])))]
pub struct AnalyzeCommand {
    /// Process a single extraction file
    #[arg(long)]
    pub single: bool,

    /// Process every document under a directory
    #[arg(long)]
    pub batch: bool,

    /// Input JSONL file (single) or directory (batch)
    #[arg(long)]
    pub jsonl: PathBuf,

    /// Output YAML file (single) or directory (batch)
    #[arg(long)]
    pub output: PathBuf,

    /// Policy content file (single) or directory (batch)
    #[arg(long)]
    pub policy: PathBuf,

    /// Policy name used in the report; defaults to the input file stem
    #[arg(long)]
    pub name: Option<String>,
}

impl AnalyzeCommand {
    pub fn execute(self, ontologies: &OntologySet) -> Result<()> {
        if !self.jsonl.exists() {
            bail!("input path does not exist: {}", self.jsonl.display());
        }
        if !self.policy.exists() {
            bail!("policy path does not exist: {}", self.policy.display());
        }

        if self.single {
            self.validate_single()?;
            let name = self
                .name
                .clone()
                .or_else(|| {
                    self.jsonl
                        .file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                })
                .unwrap_or_else(|| "unnamed".to_string());
            let summary = runner::analyze_document(
                ontologies,
                &self.jsonl,
                &self.output,
                &self.policy,
                &name,
            )
            .with_context(|| format!("failed to analyze {}", self.jsonl.display()))?;

            println!("{}", format!("Report written to {}", self.output.display()).green());
            println!(
                "  collection claims: {}, negation claims: {}",
                summary.collection_claims, summary.negation_claims
            );
            println!(
                "  contradictions: {}, narrowings: {}",
                summary.contradiction_pairs.to_string().red(),
                summary.narrowing_pairs.to_string().yellow()
            );
        } else {
            self.validate_batch()?;
            let (succeeded, total) = runner::analyze_batch(ontologies, &self.jsonl);
            println!(
                "{}",
                format!("Batch analysis complete: {succeeded}/{total} documents").green()
            );
            if succeeded < total {
                println!("{}", format!("{} document(s) failed, see log", total - succeeded).red());
            }
        }
        Ok(())
    }

    fn validate_single(&self) -> Result<()> {
        if !self.jsonl.is_file() {
            bail!("--jsonl must be a file in single mode");
        }
        if !self.policy.is_file() {
            bail!("--policy must be a file in single mode");
        }
        let output_ok = self.output.is_file()
            || self
                .output
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| ext == "yaml" || ext == "yml");
        if !output_ok {
            bail!("--output must be a YAML file in single mode");
        }
        Ok(())
    }

    fn validate_batch(&self) -> Result<()> {
        for (flag, path) in [
            ("--jsonl", &self.jsonl),
            ("--output", &self.output),
            ("--policy", &self.policy),
        ] {
            if !path.is_dir() {
                bail!("{flag} must be a directory in batch mode");
            }
        }
        Ok(())
    }
}

/// Resolve unspecified entities and infer missing claims in existing
/// reports.
#[derive(Args)]
#[command(group(ArgGroup::new("mode").required(true).args(["single", "batch"])))]
pub struct PostProcessCommand {
    /// Process a single report file
    #[arg(long)]
    pub single: bool,

    /// Process every report under a directory
    #[arg(long)]
    pub batch: bool,

    /// Input report file (single) or directory (batch)
    #[arg(long)]
    pub input: PathBuf,
}

impl PostProcessCommand {
    pub fn execute(self, ontologies: &OntologySet) -> Result<()> {
        if !self.input.exists() {
            bail!("input path does not exist: {}", self.input.display());
        }

        if self.single {
            if !self.input.is_file() {
                bail!("--input must be a file in single mode");
            }
            let stats = runner::post_process_file(ontologies, &self.input)
                .with_context(|| format!("failed to post-process {}", self.input.display()))?;
            println!(
                "{}",
                format!(
                    "Post-processed {}: {} entities resolved, {} claims inferred",
                    self.input.display(),
                    stats.resolved_entities,
                    stats.synthesized_claims
                )
                .green()
            );
        } else {
            if !self.input.is_dir() {
                bail!("--input must be a directory in batch mode");
            }
            let (succeeded, total) = runner::post_process_batch(ontologies, &self.input);
            println!(
                "{}",
                format!("Batch post-processing complete: {succeeded}/{total} reports").green()
            );
        }
        Ok(())
    }
}

/// Fails fast when the ontology directory is missing or incomplete.
pub fn validate_ontology_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        bail!("ontology directory does not exist: {}", path.display());
    }
    for family in ["entity", "data", "condition"] {
        if !path.join(family).is_dir() {
            bail!(
                "ontology directory is missing its '{family}' subdirectory: {}",
                path.display()
            );
        }
    }
    Ok(())
}
