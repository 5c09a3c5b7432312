//! Command dispatch: bridges CLI args -> core editors and pages -> output.

pub mod categories;
pub mod config_cmd;
pub mod dashboard;
pub mod images;
pub mod open;
pub mod products;
pub mod skus;
pub mod util;

use vitrine_core::Catalog;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, catalog: &Catalog, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Categories(args) => categories::handle(catalog, args, global).await,
        Command::Products(args) => products::handle(catalog, args, global).await,
        Command::Skus(args) => skus::handle(catalog, args, global).await,
        Command::Images(args) => images::handle(catalog, args, global).await,
        Command::Open { path } => open::handle(catalog, &path, global).await,
        Command::Dashboard => dashboard::handle(catalog, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
