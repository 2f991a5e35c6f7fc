use crate::{
    backend::{Backend, BackendClient, ClientContext},
    i18n::I18n,
    layout_cache::LayoutCache,
};
use std::sync::Arc;

/// Shared application state. Holds no per-user data: every request builds its
/// own backend client from it.
#[derive(Clone)]
pub struct LiquidCalcContext {
    backend: Arc<dyn Backend>,
    i18n: Arc<I18n>,
    layout_cache: LayoutCache,
}

impl LiquidCalcContext {
    pub fn new(backend: Arc<dyn Backend>, i18n: I18n) -> Self {
        Self {
            backend,
            i18n: Arc::new(i18n),
            layout_cache: LayoutCache::default(),
        }
    }

    pub fn client(&self, context: ClientContext) -> Box<dyn BackendClient> {
        self.backend.client(context)
    }

    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    pub fn layout_cache(&self) -> &LayoutCache {
        &self.layout_cache
    }
}
