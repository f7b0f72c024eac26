use crate::{error, success, warning};

use super::open_cache;

/// Removes every cached call result.
pub async fn clear_cache() {
    let cache = open_cache().await;
    let count = match cache.count().await {
        Ok(count) => Some(count),
        Err(e) => {
            warning!("Cannot count cache entries at {}. Err: {}", cache.location().display(), e);
            None
        }
    };

    if let Err(e) = cache.clear().await {
        error!("Failed to clear cache at {}. Err: {}", cache.location().display(), e);
    }
    match count {
        Some(count) => success!("Removed {} cached results from {}", count, cache.location().display()),
        None => success!("Cleared cache at {}", cache.location().display()),
    }
    cache.close();
}
