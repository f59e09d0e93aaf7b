use crate::commands::{validate_ontology_dir, AnalyzeCommand, PostProcessCommand};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use privalint_ontology::OntologySet;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "privalint")]
#[command(about = "Privalint: privacy-policy contradiction and narrowing analysis")]
#[command(version = "1.0.0")]
pub struct PrivalintCli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Root directory of the ontology files
    #[arg(long, global = true, default_value = "ontology")]
    pub ontology: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    Analyze(AnalyzeCommand),
    PostProcess(PostProcessCommand),
}

impl PrivalintCli {
    pub fn run(self) -> Result<()> {
        crate::logging::init_tracing(self.verbose);

        validate_ontology_dir(&self.ontology)?;
        let ontologies = OntologySet::load(&self.ontology)
            .with_context(|| format!("failed to load ontologies from {}", self.ontology.display()))?;

        match self.command {
            Commands::Analyze(cmd) => cmd.execute(&ontologies),
            Commands::PostProcess(cmd) => cmd.execute(&ontologies),
        }
    }
}
