use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info};

use crate::name::ArtifactName;

/// Downstream collaborator that actually runs the selected suites.
///
/// Running, aggregating and reporting are its business; this crate only
/// hands over the ordered name list.
pub trait Engine {
    fn run(&mut self, suites: &[ArtifactName]) -> Result<(), EngineError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to launch execution engine '{program}': {source}")]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("execution engine '{program}' exited with code {code}")]
    Failed { program: PathBuf, code: i32 },

    #[error("execution engine '{program}' was terminated by a signal")]
    Interrupted { program: PathBuf },
}

/// Engine that hands the suite list to an external command, one name per
/// argument, and mirrors its exit status.
pub struct CommandEngine {
    program: PathBuf,
}

impl CommandEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Engine for CommandEngine {
    fn run(&mut self, suites: &[ArtifactName]) -> Result<(), EngineError> {
        debug!(
            program = %self.program.display(),
            suites = suites.len(),
            "handing off to execution engine"
        );
        let status = Command::new(&self.program)
            .args(suites.iter().map(ArtifactName::as_str))
            .status()
            .map_err(|source| EngineError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        match status.code() {
            Some(0) => {
                info!("execution engine reported success");
                Ok(())
            }
            Some(code) => Err(EngineError::Failed {
                program: self.program.clone(),
                code,
            }),
            None => Err(EngineError::Interrupted {
                program: self.program.clone(),
            }),
        }
    }
}
