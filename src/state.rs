use std::sync::Arc;

use crate::services::catalog::ProductCatalog;
use crate::store::ProductStore;

#[derive(Clone)]
pub struct AppState {
    pub catalog: ProductCatalog,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            catalog: ProductCatalog::new(store),
        }
    }
}
