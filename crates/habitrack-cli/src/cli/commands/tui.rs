//! Interactive mode.

use anyhow::Result;
use habitrack_core::config::Config;

#[cfg(feature = "tui")]
pub fn run(config: Config) -> Result<()> {
    use std::sync::Arc;

    use anyhow::Context as _;
    use habitrack_core::api::ApiClient;
    use habitrack_core::storage::{FileStorage, Storage};

    let storage: Arc<dyn Storage> =
        Arc::new(FileStorage::open_default().context("open session storage")?);
    let api = ApiClient::from_config(&config, storage)?;
    habitrack_tui::run(config, api)
}

#[cfg(not(feature = "tui"))]
pub fn run(_config: Config) -> Result<()> {
    anyhow::bail!("habitrack was built without the interactive tracker; use a subcommand")
}
