use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::discovery::SearchPath;

#[derive(Parser, Debug)]
#[command(name = "testhound")]
#[command(
    about = "Test-suite discovery front-end - find runnable suites and hand them to an execution engine",
    long_about = None
)]
pub struct Args {
    /// Explicit suite names; skips discovery and classification entirely
    #[arg(value_name = "SUITE")]
    pub suites: Vec<String>,

    /// Logical name of the bootstrap artifact that anchors discovery
    #[arg(short, long, value_name = "NAME")]
    pub bootstrap: Option<String>,

    /// Search path entry (directory or archive); may be repeated.
    /// Falls back to the TESTHOUND_PATH environment variable.
    #[arg(long, value_name = "PATH")]
    pub search_path: Vec<PathBuf>,

    /// Execution engine command; the selected suites are printed to stdout
    /// when omitted
    #[arg(short, long, value_name = "CMD")]
    pub runner: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        if self.suites.is_empty() && self.bootstrap.is_none() {
            anyhow::bail!("either explicit suite names or --bootstrap must be given");
        }
        Ok(())
    }

    /// Search path from the command line, falling back to the environment.
    pub fn effective_search_path(&self) -> Option<SearchPath> {
        if !self.search_path.is_empty() {
            return Some(SearchPath::new(self.search_path.clone()));
        }
        SearchPath::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            suites: vec![],
            bootstrap: None,
            search_path: vec![],
            runner: None,
            verbose: 0,
            quiet: false,
        }
    }

    #[test]
    fn test_validate_requires_bootstrap_or_names() {
        assert!(args().validate().is_err());
    }

    #[test]
    fn test_validate_accepts_bootstrap_alone() {
        let mut args = args();
        args.bootstrap = Some("boot.Anchor".to_string());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_explicit_names_without_bootstrap() {
        let mut args = args();
        args.suites = vec!["pkg.FooTest".to_string()];
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_effective_search_path_prefers_flags() {
        let mut args = args();
        args.search_path = vec![PathBuf::from("/tmp/classes")];
        let search = args.effective_search_path().unwrap();
        assert_eq!(search.entries(), &[PathBuf::from("/tmp/classes")]);
    }

    #[test]
    fn test_verbose_flag_incremental() {
        let mut args = args();
        args.verbose = 2;
        assert_eq!(args.verbose, 2);
    }
}
