use dto_check::CheckReport;

use crate::context::CheckContext;
use crate::output::print_json;

/// Handle `dtocheck verify`.
pub fn verify(ctx: &mut CheckContext, json: bool) -> anyhow::Result<bool> {
    let candidates = ctx.candidates()?;
    let report = ctx.suite().verify_all(ctx.module(), &candidates);
    emit(&[report], json)
}

/// Handle `dtocheck audit`.
pub fn audit(ctx: &mut CheckContext, json: bool) -> anyhow::Result<bool> {
    let candidates = ctx.candidates()?;
    let report = ctx.suite().audit_all(ctx.module(), &candidates);
    emit(&[report], json)
}

/// Handle `dtocheck all`. Both checks always run; fail-fast applies within each.
pub fn all(ctx: &mut CheckContext, json: bool) -> anyhow::Result<bool> {
    let candidates = ctx.candidates()?;
    let suite = ctx.suite();
    let reports = [
        suite.verify_all(ctx.module(), &candidates),
        suite.audit_all(ctx.module(), &candidates),
    ];
    emit(&reports, json)
}

fn emit(reports: &[CheckReport], json: bool) -> anyhow::Result<bool> {
    if json {
        match reports {
            [single] => print_json(single)?,
            many => print_json(&many)?,
        }
    } else {
        for report in reports {
            print!("{report}");
        }
    }
    Ok(reports.iter().all(CheckReport::is_success))
}
