use dto_check::CandidateType;
use dto_core::TypeDescriptor;
use serde::Serialize;

use crate::context::CheckContext;
use crate::output::print_json;

#[derive(Debug, Serialize)]
struct ModuleListing {
    module: String,
    version: String,
    declared: Vec<&'static str>,
    candidates: Vec<&'static str>,
    excluded: Vec<ExcludedType>,
}

#[derive(Debug, Serialize)]
struct ExcludedType {
    name: &'static str,
    reason: &'static str,
}

/// Handle `dtocheck list`.
pub fn handle(ctx: &mut CheckContext, json: bool) -> anyhow::Result<bool> {
    let candidates = ctx.candidates()?;
    let module = ctx.module().to_string();
    let manifest = ctx.deps.load(&module)?;

    let listing = ModuleListing {
        module: manifest.name().to_string(),
        version: manifest.version().to_string(),
        declared: ctx.deps.declared_names(),
        candidates: candidates.iter().map(CandidateType::name).collect(),
        excluded: manifest
            .types()
            .iter()
            .filter_map(|t| exclusion_reason(t).map(|reason| ExcludedType { name: t.name(), reason }))
            .collect(),
    };

    if json {
        print_json(&listing)?;
    } else {
        println!("{} {}", listing.module, listing.version);
        for name in &listing.candidates {
            println!("  {name}");
        }
        for excluded in &listing.excluded {
            println!("  {} (skipped: {})", excluded.name, excluded.reason);
        }
    }
    Ok(true)
}

const fn exclusion_reason(descriptor: &TypeDescriptor) -> Option<&'static str> {
    if !descriptor.is_marked() {
        Some("not a serializable object")
    } else if descriptor.is_abstract() {
        Some("abstract")
    } else if descriptor.generic_params() > 0 {
        Some("open generic")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::context::declared_dependencies;

    #[test]
    fn non_candidates_carry_a_reason() {
        let mut deps = declared_dependencies();
        let manifest = deps.load("dto-model").expect("dto-model is declared");
        let excluded: Vec<(&str, &str)> = manifest
            .types()
            .iter()
            .filter_map(|t| exclusion_reason(t).map(|reason| (t.name(), reason)))
            .collect();
        assert_eq!(
            excluded,
            vec![
                ("Page", "open generic"),
                ("Resource", "abstract"),
                ("ClientOptions", "not a serializable object"),
            ]
        );
    }
}
