//! Runs a check over every candidate type of a module.

use dto_config::{DtoConfig, FailurePolicy};
use tracing::{info, warn};

use crate::audit::audit;
use crate::discovery::CandidateType;
use crate::error::CheckError;
use crate::report::{CheckFailure, CheckKind, CheckReport};
use crate::verify::{Verifier, VerifyOptions};

/// Applies the verifier or the auditor to a set of candidates under one
/// failure policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Suite {
    verifier: Verifier,
    policy: FailurePolicy,
}

impl Suite {
    #[must_use]
    pub const fn new(options: VerifyOptions, policy: FailurePolicy) -> Self {
        Self {
            verifier: Verifier::new(options),
            policy,
        }
    }

    #[must_use]
    pub fn from_config(config: &DtoConfig) -> Self {
        Self::new(VerifyOptions::from_config(config), config.verify.failure_policy)
    }

    #[must_use]
    pub const fn verifier(&self) -> &Verifier {
        &self.verifier
    }

    #[must_use]
    pub const fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Round-trip every candidate.
    #[must_use]
    pub fn verify_all(&self, module: &str, candidates: &[CandidateType]) -> CheckReport {
        self.run(CheckKind::Verify, module, candidates, |candidate| {
            self.verifier.verify(candidate).map(|_| ()).map_err(|e| vec![e])
        })
    }

    /// Audit every candidate's directives.
    #[must_use]
    pub fn audit_all(&self, module: &str, candidates: &[CandidateType]) -> CheckReport {
        self.run(CheckKind::Audit, module, candidates, |candidate| {
            let audit = audit(candidate);
            if audit.is_clean() {
                Ok(())
            } else {
                Err(audit.violations)
            }
        })
    }

    fn run<F>(
        &self,
        check: CheckKind,
        module: &str,
        candidates: &[CandidateType],
        mut check_one: F,
    ) -> CheckReport
    where
        F: FnMut(&CandidateType) -> Result<(), Vec<CheckError>>,
    {
        let mut report = CheckReport::new(check, module, self.policy);

        for (index, candidate) in candidates.iter().enumerate() {
            match check_one(candidate) {
                Ok(()) => report.passed.push(candidate.name().to_string()),
                Err(errors) => {
                    for err in &errors {
                        warn!(%check, type_name = candidate.name(), error = %err, "check failed");
                    }
                    if self.policy == FailurePolicy::FailFast {
                        report.failures.extend(errors.first().map(CheckFailure::from));
                        report.skipped = candidates[index + 1..]
                            .iter()
                            .map(|c| c.name().to_string())
                            .collect();
                        break;
                    }
                    report.failures.extend(errors.iter().map(CheckFailure::from));
                }
            }
        }

        info!(
            %check,
            module,
            passed = report.passed.len(),
            failures = report.failures.len(),
            skipped = report.skipped.len(),
            "check finished"
        );
        report
    }
}
