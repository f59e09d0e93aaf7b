use crate::ingest::load_extraction_file;
use crate::normalize::normalize;
use crate::post::{post_process_report, PostStats};
use crate::report::{build_report, read_report, write_report};
use privalint_conflict::RuleEngine;
use privalint_core::{PrivalintError, PrivalintResult};
use privalint_ontology::OntologySet;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use walkdir::WalkDir;

pub const POST_PREFIX: &str = "post_";

/// What one analyzed document produced, for console summaries.
#[derive(Debug, Clone, Copy)]
pub struct DocumentSummary {
    pub collection_claims: usize,
    pub negation_claims: usize,
    pub contradiction_pairs: usize,
    pub narrowing_pairs: usize,
}

/// Analyzes one extraction file end to end and writes its YAML report.
pub fn analyze_document(
    ontologies: &OntologySet,
    jsonl_path: &Path,
    output_path: &Path,
    policy_path: &Path,
    name: &str,
) -> PrivalintResult<DocumentSummary> {
    let raw = load_extraction_file(ontologies, jsonl_path)?;
    let normalized = normalize(ontologies, raw);

    let positive_claims: Vec<_> = normalized.positives.iter().map(|m| m.claim.clone()).collect();
    let negative_claims: Vec<_> = normalized.negatives.iter().map(|m| m.claim.clone()).collect();
    let outcome = RuleEngine::new(ontologies).apply(&positive_claims, &negative_claims);

    let policy_bytes = std::fs::read(policy_path).map_err(|err| PrivalintError::IoError {
        operation: format!("read policy {}", policy_path.display()),
        reason: err.to_string(),
    })?;
    let policy_content = String::from_utf8_lossy(&policy_bytes).into_owned();

    let report = build_report(
        name,
        &policy_content,
        &normalized.positives,
        &normalized.negatives,
        &outcome.contradictions,
        &outcome.narrowings,
    );
    write_report(&report, output_path)?;

    let summary = DocumentSummary {
        collection_claims: normalized.positives.len(),
        negation_claims: normalized.negatives.len(),
        contradiction_pairs: outcome.contradictions.len(),
        narrowing_pairs: outcome.narrowings.len(),
    };
    info!(
        name,
        collection = summary.collection_claims,
        negation = summary.negation_claims,
        contradictions = summary.contradiction_pairs,
        narrowings = summary.narrowing_pairs,
        "analyzed document"
    );
    Ok(summary)
}

/// One unit of batch work: the extraction file, its policy content file and
/// the report destination, all in the same directory.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub name: String,
    pub jsonl_path: PathBuf,
    pub policy_path: PathBuf,
    pub output_path: PathBuf,
}

/// Finds every `*analysis*.jsonl` under the root and pairs it with the
/// policy content file in the same directory: `cleaned.html`, then
/// `cleaned.md`, then the first html/htm/txt/md file.
pub fn discover_batch(root: &Path) -> Vec<BatchItem> {
    let mut items = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };
        if !entry.file_type().is_file()
            || !file_name.ends_with(".jsonl")
            || !file_name.contains("analysis")
        {
            continue;
        }
        let dir = match path.parent() {
            Some(dir) => dir,
            None => continue,
        };
        let policy_path = match find_policy_content(dir) {
            Some(policy) => policy,
            None => {
                error!(directory = %dir.display(), "no policy content file found, skipping");
                continue;
            }
        };
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());
        items.push(BatchItem {
            name,
            jsonl_path: path.to_path_buf(),
            policy_path,
            output_path: dir.join("analysis.yaml"),
        });
    }
    items
}

fn find_policy_content(dir: &Path) -> Option<PathBuf> {
    for preferred in ["cleaned.html", "cleaned.md"] {
        let candidate = dir.join(preferred);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    let mut fallbacks: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && matches!(
                    p.extension().and_then(|e| e.to_str()),
                    Some("html") | Some("htm") | Some("txt") | Some("md")
                )
        })
        .collect();
    fallbacks.sort();
    fallbacks.into_iter().next()
}

/// Analyzes every discovered document; documents are independent, so they
/// run in parallel, and one failure never stops the rest.
pub fn analyze_batch(ontologies: &OntologySet, root: &Path) -> (usize, usize) {
    let items = discover_batch(root);
    info!(documents = items.len(), root = %root.display(), "starting batch analysis");

    let outcomes: Vec<bool> = items
        .par_iter()
        .map(|item| {
            match analyze_document(
                ontologies,
                &item.jsonl_path,
                &item.output_path,
                &item.policy_path,
                &item.name,
            ) {
                Ok(_) => true,
                Err(err) => {
                    error!(name = %item.name, "document failed: {err}");
                    false
                }
            }
        })
        .collect();

    let succeeded = outcomes.iter().filter(|ok| **ok).count();
    (succeeded, items.len())
}

/// Post-processes one report, writing the `post_`-prefixed variant next to
/// the input.
pub fn post_process_file(ontologies: &OntologySet, path: &Path) -> PrivalintResult<PostStats> {
    let mut report = read_report(path)?;
    let stats = post_process_report(ontologies, &mut report);

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PrivalintError::ValidationError {
            field: "input".to_string(),
            message: format!("not a file path: {}", path.display()),
        })?;
    let output = path.with_file_name(format!("{POST_PREFIX}{file_name}"));
    write_report(&report, &output)?;
    Ok(stats)
}

/// Post-processes every report under the root, skipping outputs of previous
/// runs.
pub fn post_process_batch(ontologies: &OntologySet, root: &Path) -> (usize, usize) {
    let reports: Vec<PathBuf> = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension().and_then(|e| e.to_str()) == Some("yaml")
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|name| !name.starts_with(POST_PREFIX))
        })
        .collect();

    let outcomes: Vec<bool> = reports
        .par_iter()
        .map(|path| match post_process_file(ontologies, path) {
            Ok(_) => true,
            Err(err) => {
                error!(path = %path.display(), "post-processing failed: {err}");
                false
            }
        })
        .collect();

    let succeeded = outcomes.iter().filter(|ok| **ok).count();
    (succeeded, reports.len())
}
