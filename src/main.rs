use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;

use testhound::classifier::{PathIntrospector, TestClassifier};
use testhound::cli;
use testhound::discovery::{self, MountRegistry};
use testhound::engine::{CommandEngine, Engine};
use testhound::logging::{self, Verbosity};
use testhound::name::ArtifactName;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));
    args.validate().context("Invalid arguments")?;

    let suites = if args.suites.is_empty() {
        let bootstrap = args
            .bootstrap
            .as_deref()
            .map(ArtifactName::new)
            .context("--bootstrap is required when no suite names are given")?;
        let search = args
            .effective_search_path()
            .context("No search path given (use --search-path or TESTHOUND_PATH)")?;
        let registry = MountRegistry::global();

        let discovered = discovery::discover(&bootstrap, &search, registry)
            .context("Artifact discovery failed")?;
        let classifier = TestClassifier::new(PathIntrospector::new(&search, registry));
        let mut selected: Vec<ArtifactName> = discovered
            .into_iter()
            .filter(|name| classifier.is_test_unit(name))
            .collect();
        selected.sort();
        tracing::info!(selected = selected.len(), "test suites selected");
        selected
    } else {
        args.suites.iter().cloned().map(ArtifactName::new).collect()
    };

    match &args.runner {
        Some(program) => CommandEngine::new(program)
            .run(&suites)
            .context("Test run failed")?,
        None => {
            for suite in &suites {
                println!("{suite}");
            }
        }
    }

    Ok(())
}
