//! Integration tests for layered configuration loading.
//!
//! Uses figment::Jail for sandboxed working directory and env vars.

use std::path::Path;

use dto_config::{ConfigError, DtoConfig, FailurePolicy};
use figment::Jail;

#[test]
fn defaults_without_files_or_env() {
    Jail::expect_with(|_jail| {
        let config = DtoConfig::load().expect("config loads");
        assert_eq!(config.target.module, "dto-model");
        assert_eq!(config.fabrication.max_depth, 6);
        assert_eq!(config.verify.failure_policy, FailurePolicy::CollectAll);
        Ok(())
    });
}

#[test]
fn loads_project_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "dtocheck.toml",
            r#"
[target]
module = "billing-model"

[fabrication]
max_depth = 3
collection_len = 1
validate_schema = false

[verify]
typed_roundtrip = false
indent = 4
failure_policy = "fail_fast"
"#,
        )?;

        let config = DtoConfig::load().expect("config loads");
        assert_eq!(config.target.module, "billing-model");
        assert_eq!(config.fabrication.max_depth, 3);
        assert_eq!(config.fabrication.collection_len, 1);
        assert!(!config.fabrication.validate_schema);
        assert!(!config.verify.typed_roundtrip);
        assert_eq!(config.verify.indent, 4);
        assert_eq!(config.verify.failure_policy, FailurePolicy::FailFast);
        Ok(())
    });
}

#[test]
fn env_beats_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "dtocheck.toml",
            r#"
[target]
module = "from-file"
"#,
        )?;
        jail.set_env("DTOCHECK_TARGET__MODULE", "from-env");
        jail.set_env("DTOCHECK_VERIFY__FAILURE_POLICY", "fail_fast");

        let config = DtoConfig::load().expect("config loads");
        assert_eq!(config.target.module, "from-env");
        assert_eq!(config.verify.failure_policy, FailurePolicy::FailFast);
        Ok(())
    });
}

#[test]
fn explicit_file_is_used() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "ci.toml",
            r"
[fabrication]
collection_len = 5
",
        )?;

        let config = DtoConfig::load_from(Path::new("ci.toml")).expect("config loads");
        assert_eq!(config.fabrication.collection_len, 5);
        assert_eq!(config.target.module, "dto-model");
        Ok(())
    });
}

#[test]
fn missing_explicit_file_is_an_error() {
    Jail::expect_with(|_jail| {
        let err = DtoConfig::load_from(Path::new("typo.toml")).unwrap_err();
        match err {
            ConfigError::FileNotFound { path } => assert_eq!(path, Path::new("typo.toml")),
            other => panic!("expected FileNotFound, got {other}"),
        }
        Ok(())
    });
}

#[test]
fn out_of_range_value_is_rejected_on_load() {
    Jail::expect_with(|jail| {
        jail.set_env("DTOCHECK_FABRICATION__COLLECTION_LEN", "0");
        let err = DtoConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}

#[test]
fn unknown_policy_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("DTOCHECK_VERIFY__FAILURE_POLICY", "sometimes");
        let err = DtoConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
