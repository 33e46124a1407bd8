//! Global config with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement.
//! The preview server calls [`reload_config`] before each request so edits
//! to `folio.toml` show up on the next page load.
//!
//! # Usage
//!
//! ```ignore
//! use crate::config::cfg;
//!
//! let c = cfg();
//! build_site(&c)?;  // Arc auto-derefs to &SiteConfig
//! ```

use super::SiteConfig;
use crate::utils::hash;
use arc_swap::ArcSwap;
use std::{
    fs,
    sync::{
        Arc, LazyLock,
        atomic::{AtomicU64, Ordering},
    },
};

// =============================================================================
// Global State
// =============================================================================

/// Global config storage with atomic replacement support.
///
/// Initialized with default config, then replaced with loaded config in main.
pub static CONFIG: LazyLock<ArcSwap<SiteConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(SiteConfig::default()));

/// Hash of the config file content last loaded.
static CONFIG_HASH: AtomicU64 = AtomicU64::new(0);

// =============================================================================
// Public API
// =============================================================================

/// Get current config as `Arc<SiteConfig>`.
///
/// Lock-free read via atomic load.
#[inline]
pub fn cfg() -> Arc<SiteConfig> {
    CONFIG.load_full()
}

/// Replace config atomically if `folio.toml` changed on disk.
///
/// Returns `true` if config was actually updated, `false` if content matches last load.
///
/// # Errors
///
/// Returns error if the file cannot be read or no longer validates; the
/// previous config stays active in that case.
pub fn reload_config() -> anyhow::Result<bool> {
    let c = cfg();
    let Some(cli) = c.cli else {
        return Ok(false);
    };

    let content = fs::read_to_string(&c.config_path)?;
    let new_hash = hash::compute(content.as_bytes());

    if new_hash == CONFIG_HASH.load(Ordering::Relaxed) {
        return Ok(false);
    }

    let new_config = SiteConfig::load(cli)?;
    CONFIG.store(Arc::new(new_config));
    CONFIG_HASH.store(new_hash, Ordering::Relaxed);

    Ok(true)
}

/// Initialize global config (called once at startup).
#[inline]
pub fn init_config(config: SiteConfig) {
    if let Ok(content) = fs::read_to_string(&config.config_path) {
        CONFIG_HASH.store(hash::compute(content.as_bytes()), Ordering::Relaxed);
    }

    CONFIG.store(Arc::new(config));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_without_cli_is_noop() {
        // Default config carries no CLI reference, so nothing can be reloaded.
        assert!(!reload_config().unwrap());
    }
}
