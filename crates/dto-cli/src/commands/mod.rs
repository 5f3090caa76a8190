pub mod check;
pub mod list;
pub mod sample;

use crate::cli::{Cli, Commands};
use crate::context::CheckContext;

/// Run the selected command. `Ok(false)` means a check failed.
pub fn dispatch(cli: &Cli, ctx: &mut CheckContext) -> anyhow::Result<bool> {
    match &cli.command {
        Commands::List => list::handle(ctx, cli.json),
        Commands::Verify => check::verify(ctx, cli.json),
        Commands::Audit => check::audit(ctx, cli.json),
        Commands::All => check::all(ctx, cli.json),
        Commands::Sample {
            type_name,
            leave_null,
        } => sample::handle(ctx, type_name, leave_null.as_deref(), cli.json),
    }
}
