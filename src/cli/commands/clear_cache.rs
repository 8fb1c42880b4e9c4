use anyhow::Result;
use tracing::info;

use crate::config::ClientConfig;

/// Empties the generation chart cache and returns how many entries went.
pub fn clear_cache(config: &ClientConfig) -> Result<usize> {
    let cache = config.open_cache()?;
    let removed = cache.borrow_mut().clear();

    info!(
        "Removed {} cached entries from {}",
        removed,
        config.cache_file().display()
    );
    println!("Removed {} cached entries", removed);
    Ok(removed)
}
