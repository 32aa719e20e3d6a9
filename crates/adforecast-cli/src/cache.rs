//! `cache show` and `cache clear`.

use adforecast_core::AppConfig;
use adforecast_metrics::{clear_metrics_entries, KeyValueStore};

use crate::forecast::open_store;

pub(crate) fn run_show(config: &AppConfig) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let keys = store.keys()?;
    if keys.is_empty() {
        println!("store at {} is empty", store.path().display());
        return Ok(());
    }
    for key in keys {
        let value = store.get(&key)?.unwrap_or_default();
        println!("{key}\t{value}");
    }
    Ok(())
}

pub(crate) fn run_clear(config: &AppConfig, all: bool) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let removed = if all {
        let keys = store.keys()?;
        let mut removed = 0usize;
        for key in keys {
            if store.remove(&key)? {
                removed += 1;
            }
        }
        removed
    } else {
        clear_metrics_entries(store.as_ref())?
    };
    tracing::info!(removed, all, "cleared store entries");
    println!("removed {removed} entries");
    Ok(())
}
