//! Per-wizard forecast session: the in-memory tier of the resolver.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Holds the average CPC values learned during one wizard session.
///
/// Created when the wizard opens and dropped when it closes; nothing here
/// outlives the session. Keys are the same strings used for the persisted
/// cache (see [`crate::store::metrics_cache_key`]).
#[derive(Debug)]
pub struct ForecastSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    avg_cpc: Mutex<HashMap<String, f64>>,
}

impl Default for ForecastSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            avg_cpc: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn memory_cpc(&self, key: &str) -> Option<f64> {
        let map = self.avg_cpc.lock().unwrap_or_else(PoisonError::into_inner);
        map.get(key).copied()
    }

    /// Records a CPC for `key`. Non-finite or non-positive values are ignored.
    pub fn remember_cpc(&self, key: &str, avg_cpc: f64) {
        if !avg_cpc.is_finite() || avg_cpc <= 0.0 {
            return;
        }
        let mut map = self.avg_cpc.lock().unwrap_or_else(PoisonError::into_inner);
        map.insert(key.to_owned(), avg_cpc);
    }

    pub fn forget(&self, key: &str) {
        let mut map = self.avg_cpc.lock().unwrap_or_else(PoisonError::into_inner);
        map.remove(key);
    }
}
