//! Fabrication over self-referential type graphs terminates.

use dto_check::{CheckError, FabricationError, FailureKind, Suite, Verifier, VerifyOptions, discover};
use dto_config::FailurePolicy;
use dto_core::{ApiObject, FieldSpec, ModuleManifest};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct Team {
    name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    members: Vec<Member>,
}

impl ApiObject for Team {
    const TYPE_NAME: &'static str = "Team";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::json("name", "name"),
        FieldSpec::json("members", "members"),
    ];
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct Member {
    login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    team: Option<Box<Team>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mentor: Option<Box<Member>>,
}

impl ApiObject for Member {
    const TYPE_NAME: &'static str = "Member";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::json("login", "login"),
        FieldSpec::json("team", "team"),
        FieldSpec::json("mentor", "mentor"),
    ];
}

/// A required self-reference: no finite instance exists.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
struct Ouroboros {
    tail: Box<Ouroboros>,
}

impl ApiObject for Ouroboros {
    const TYPE_NAME: &'static str = "Ouroboros";
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::json("tail", "tail")];
}

fn manifest() -> ModuleManifest {
    ModuleManifest::builder("graph-model", "0.1.0")
        .object::<Team>()
        .object::<Member>()
        .object::<Ouroboros>()
        .build()
        .unwrap()
}

#[test]
fn mutual_references_round_trip() {
    let candidates = discover(&manifest());
    let verifier = Verifier::default();
    for candidate in candidates.iter().filter(|c| c.name() != "Ouroboros") {
        let result = verifier.verify(candidate);
        assert!(result.is_ok(), "{}: {:?}", candidate.name(), result.err());
    }
}

#[test]
fn unbounded_required_cycle_is_a_fabrication_error() {
    let candidates = discover(&manifest());
    let ouroboros = candidates.iter().find(|c| c.name() == "Ouroboros").unwrap();
    let err = Verifier::default().verify(ouroboros).unwrap_err();
    assert!(matches!(
        err,
        CheckError::InstanceFabrication {
            source: FabricationError::Cycle { .. } | FabricationError::DepthExceeded { .. },
            ..
        }
    ));
}

#[test]
fn depth_one_still_terminates() {
    let mut options = VerifyOptions::default();
    options.fabrication.max_depth = 1;
    let candidates = discover(&manifest());
    let team = candidates.iter().find(|c| c.name() == "Team").unwrap();
    let encoded = Verifier::new(options).encode_instance(team, None).unwrap();
    assert_eq!(encoded.encoded, serde_json::json!({"name": "name-1"}));
}

#[test]
fn report_names_the_failing_type() {
    let candidates = discover(&manifest());
    let report = Suite::new(VerifyOptions::default(), FailurePolicy::CollectAll)
        .verify_all("graph-model", &candidates);
    assert_eq!(report.passed, vec!["Team".to_string(), "Member".to_string()]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].kind, FailureKind::InstanceFabrication);
    assert_eq!(report.failures[0].type_name.as_deref(), Some("Ouroboros"));
}
