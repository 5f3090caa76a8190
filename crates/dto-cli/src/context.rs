use anyhow::Context;
use dto_check::{CandidateType, Dependencies, Suite};
use dto_config::{DtoConfig, FailurePolicy};
use tracing::debug;

use crate::cli::Cli;

/// Resolved configuration and the declared entity models.
pub struct CheckContext {
    pub config: DtoConfig,
    pub deps: Dependencies,
}

impl CheckContext {
    /// Load config, apply CLI overrides, and declare the linked models.
    pub fn init(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => DtoConfig::load_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => DtoConfig::load().context("failed to load dtocheck configuration")?,
        };

        if let Some(module) = &cli.module {
            config.target.module.clone_from(module);
        }
        if cli.fail_fast {
            config.verify.failure_policy = FailurePolicy::FailFast;
        }
        config.validate().context("invalid configuration after CLI overrides")?;

        debug!(
            module = %config.target.module,
            policy = %config.verify.failure_policy,
            max_depth = config.fabrication.max_depth,
            "configuration loaded"
        );

        Ok(Self {
            config,
            deps: declared_dependencies(),
        })
    }

    pub fn module(&self) -> &str {
        &self.config.target.module
    }

    pub fn suite(&self) -> Suite {
        Suite::from_config(&self.config)
    }

    /// Candidate types of the target module.
    pub fn candidates(&mut self) -> anyhow::Result<Vec<CandidateType>> {
        let module = self.config.target.module.clone();
        self.deps
            .discover(&module)
            .with_context(|| format!("cannot check module '{module}'"))
    }
}

/// Entity models linked into this binary.
pub fn declared_dependencies() -> Dependencies {
    Dependencies::new().declare(dto_model::MODULE_NAME, dto_model::manifest)
}
