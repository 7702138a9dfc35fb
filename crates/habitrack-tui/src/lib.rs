//! Full-screen TUI for habitrack.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
pub use features::{auth, habits, today};
use habitrack_core::api::ApiClient;
use habitrack_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive tracker until the user quits.
///
/// Must be called inside a tokio runtime; effect handlers are spawned on it.
///
/// # Errors
/// Returns an error if stdout is not a terminal or the terminal fails.
pub fn run(config: Config, api: ApiClient) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The interactive tracker requires a terminal.\n\
             Use `habitrack today` or `habitrack habits list` for non-interactive use."
        );
    }

    let mut runtime = TuiRuntime::new(config, api)?;
    runtime.run()?;
    drop(runtime);

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
