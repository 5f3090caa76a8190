use anyhow::Context;
use dto_check::CandidateType;
use serde::Serialize;

use crate::context::CheckContext;
use crate::output::print_json;

#[derive(Debug, Serialize)]
struct Sample {
    type_name: &'static str,
    sample: serde_json::Value,
}

/// Handle `dtocheck sample <TYPE>`.
pub fn handle(
    ctx: &mut CheckContext,
    type_name: &str,
    leave_null: Option<&str>,
    json: bool,
) -> anyhow::Result<bool> {
    let candidates = ctx.candidates()?;
    let candidate = candidates
        .iter()
        .find(|c| c.name() == type_name)
        .with_context(|| {
            let known: Vec<&str> = candidates.iter().map(CandidateType::name).collect();
            format!(
                "'{type_name}' is not a candidate type of {} (candidates: {})",
                ctx.module(),
                known.join(", ")
            )
        })?;

    let encoded = ctx.suite().verifier().encode_instance(candidate, leave_null)?;
    if json {
        print_json(&Sample {
            type_name: candidate.name(),
            sample: dto_check::canonical::normalize(&encoded.encoded),
        })?;
    } else {
        println!("{}", encoded.canonical);
    }
    Ok(true)
}
