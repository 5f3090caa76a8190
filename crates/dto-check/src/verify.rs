//! Round-trip serialization verifier.
//!
//! For one candidate type:
//!
//! ```text
//! schema ─▶ fabricate ─▶ instantiate + encode ─▶ canonical text (A)
//!                                                    │
//!                        parse into serde_json::Value ─▶ canonical text (B)   A == B
//!                        parse into the concrete type ─▶ canonical text (C)   A == C (typed)
//! ```

use dto_config::DtoConfig;
use dto_core::{CodecError, Directive, FieldSpec};
use serde_json::Value;
use tracing::debug;

use crate::canonical::{CanonicalFormat, first_difference};
use crate::discovery::CandidateType;
use crate::error::{CheckError, FabricationError, MismatchStage};
use crate::fabricate::{FabricationOptions, Fabricator};

/// Options for the verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOptions {
    pub fabrication: FabricationOptions,
    pub format: CanonicalFormat,
    /// Also decode the canonical text into the concrete type.
    pub typed_roundtrip: bool,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self::from_config(&DtoConfig::default())
    }
}

impl VerifyOptions {
    #[must_use]
    pub fn from_config(config: &DtoConfig) -> Self {
        Self {
            fabrication: FabricationOptions::from(&config.fabrication),
            format: CanonicalFormat::new(config.verify.indent),
            typed_roundtrip: config.verify.typed_roundtrip,
        }
    }
}

/// A fabricated instance and its encodings.
#[derive(Debug, Clone)]
pub struct Encoded {
    /// The value the instance was built from.
    pub fabricated: Value,
    /// The instance, serialized.
    pub encoded: Value,
    /// `encoded` in canonical form.
    pub canonical: String,
}

/// A successful round-trip.
#[derive(Debug, Clone)]
pub struct RoundTrip {
    pub type_name: &'static str,
    pub canonical: String,
}

/// Runs the round-trip check for single types.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verifier {
    options: VerifyOptions,
}

impl Verifier {
    #[must_use]
    pub const fn new(options: VerifyOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &VerifyOptions {
        &self.options
    }

    /// Fabricate an instance of `candidate` and encode it.
    ///
    /// `leave_null` names a top-level property to leave unpopulated.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::InstanceFabrication`] if no instance could be
    /// built, [`CheckError::Serialization`] if the encoder fails, and
    /// [`CheckError::DroppedProperty`] if a populated property is missing
    /// from the encoding.
    pub fn encode_instance(
        &self,
        candidate: &CandidateType,
        leave_null: Option<&str>,
    ) -> Result<Encoded, CheckError> {
        let type_name = candidate.name();
        let hooks = candidate.hooks();

        let schema = (hooks.schema)()
            .map_err(|e| CheckError::fabrication(type_name, FabricationError::Schema(e)))?;

        let mut fabricator = Fabricator::new(&schema, self.options.fabrication);
        if let Some(property) = leave_null {
            fabricator = fabricator.leave_null(property);
        }
        let fabricated = fabricator
            .fabricate()
            .map_err(|e| CheckError::fabrication(type_name, e))?;

        let encoded = (hooks.encode)(fabricated.clone()).map_err(|e| match e {
            CodecError::Instantiate(source) => {
                CheckError::fabrication(type_name, FabricationError::Instantiate(source))
            }
            CodecError::Encode(source) => CheckError::serialization(type_name, source),
        })?;

        check_dropped(type_name, hooks.fields, &fabricated, &encoded)?;

        let canonical = self
            .options
            .format
            .encode(&encoded)
            .map_err(|e| CheckError::serialization(type_name, e))?;

        Ok(Encoded {
            fabricated,
            encoded,
            canonical,
        })
    }

    /// Prove that `candidate`'s encoding is stable under decode/re-encode.
    ///
    /// # Errors
    ///
    /// Any error of [`Self::encode_instance`], plus
    /// [`CheckError::SerializationMismatch`] when a re-encoding differs and
    /// [`CheckError::Deserialization`] when the typed decode fails.
    pub fn verify(&self, candidate: &CandidateType) -> Result<RoundTrip, CheckError> {
        let type_name = candidate.name();
        let Encoded { canonical, .. } = self.encode_instance(candidate, None)?;
        let format = self.options.format;

        let generic: Value = serde_json::from_str(&canonical)
            .map_err(|e| CheckError::serialization(type_name, e))?;
        let regenerated = format
            .encode(&generic)
            .map_err(|e| CheckError::serialization(type_name, e))?;
        compare(type_name, MismatchStage::Generic, &canonical, regenerated)?;

        if self.options.typed_roundtrip {
            let typed = (candidate.hooks().decode)(&canonical).map_err(|e| match e {
                CodecError::Instantiate(source) => CheckError::Deserialization {
                    type_name: type_name.to_string(),
                    source,
                },
                CodecError::Encode(source) => CheckError::serialization(type_name, source),
            })?;
            let retyped = format
                .encode(&typed)
                .map_err(|e| CheckError::serialization(type_name, e))?;
            compare(type_name, MismatchStage::Typed, &canonical, retyped)?;
        }

        debug!(type_name, bytes = canonical.len(), "round-trip stable");
        Ok(RoundTrip {
            type_name,
            canonical,
        })
    }

    /// Canonical encoding of a fabricated instance, for inspection.
    ///
    /// # Errors
    ///
    /// Same as [`Self::encode_instance`].
    pub fn sample(&self, candidate: &CandidateType) -> Result<String, CheckError> {
        self.encode_instance(candidate, None).map(|e| e.canonical)
    }
}

fn compare(
    type_name: &str,
    stage: MismatchStage,
    expected: &str,
    actual: String,
) -> Result<(), CheckError> {
    if expected == actual {
        return Ok(());
    }
    Err(CheckError::SerializationMismatch {
        type_name: type_name.to_string(),
        stage,
        first_difference: first_difference(expected, &actual),
        expected: expected.to_string(),
        actual,
    })
}

/// Every populated top-level property of `fabricated` must survive encoding,
/// unless its field (own or inherited) is declared excluded.
///
/// Values that are `null`, `[]`, or `{}` are skipped: they are either
/// deliberately unpopulated or truncated, and serde commonly omits them.
fn check_dropped(
    type_name: &str,
    fields: &'static [FieldSpec],
    fabricated: &Value,
    encoded: &Value,
) -> Result<(), CheckError> {
    let (Value::Object(fabricated), Value::Object(encoded)) = (fabricated, encoded) else {
        return Ok(());
    };
    let mut excluded = Vec::new();
    excluded_fields(fields, &mut excluded);
    for (property, value) in fabricated {
        if is_unpopulated(value) || excluded.contains(&property.as_str()) {
            continue;
        }
        if encoded.get(property).is_none_or(Value::is_null) {
            return Err(CheckError::DroppedProperty {
                type_name: type_name.to_string(),
                property: property.clone(),
            });
        }
    }
    Ok(())
}

fn excluded_fields(fields: &'static [FieldSpec], out: &mut Vec<&'static str>) {
    for field in fields {
        match field.directive {
            Directive::Exclude => out.push(field.name),
            Directive::Serialize { .. } => {}
            Directive::Inherit { fields, .. } => excluded_fields(fields, out),
        }
    }
}

fn is_unpopulated(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
