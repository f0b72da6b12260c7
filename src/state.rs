use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::pricing::PriceTable;
use crate::store::SheetStore;

/// Live operator sessions. Logout removes the id, which revokes the
/// token immediately.
pub type Sessions = Arc<RwLock<HashSet<Uuid>>>;

#[derive(Clone)]
pub struct AppState {
    pub store: SheetStore,
    pub config: AppConfig,
    pub pricing: PriceTable,
    pub sessions: Sessions,
}

impl AppState {
    pub fn new(pool: DbPool, config: AppConfig) -> Self {
        let pricing = config.price_table();
        Self {
            store: SheetStore::new(pool),
            config,
            pricing,
            sessions: Arc::new(RwLock::new(HashSet::new())),
        }
    }
}
