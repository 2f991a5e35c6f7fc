use crate::i18n::{Locale, Translator};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::debug;

const NAVIGATION: [(&str, &str); 5] = [
    ("/", "Navigation.home"),
    ("/calculator", "Navigation.calculator"),
    ("/liquids", "Navigation.liquids"),
    ("/bases", "Navigation.bases"),
    ("/flavours", "Navigation.flavours"),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: String,
}

/// Translated navigation, memoized per locale. Never holds anything derived
/// from a session.
#[derive(Clone, Debug, Default)]
pub struct LayoutCache {
    navigation: Arc<RwLock<HashMap<Locale, Arc<Vec<NavLink>>>>>,
}

impl LayoutCache {
    pub async fn navigation(&self, translator: Translator<'_>) -> Arc<Vec<NavLink>> {
        if let Some(links) = self.navigation.read().await.get(translator.locale()) {
            return links.clone();
        }

        let links = Arc::new(
            NAVIGATION
                .iter()
                .map(|&(href, key)| NavLink {
                    href,
                    label: translator.t(key),
                })
                .collect::<Vec<_>>(),
        );

        self.navigation
            .write()
            .await
            .entry(translator.locale().clone())
            .or_insert(links)
            .clone()
    }

    /// Drop everything so the next render rebuilds the layout.
    pub async fn revalidate(&self) {
        self.navigation.write().await.clear();
        debug!("layout cache revalidated");
    }

    pub async fn is_cached(&self, locale: &Locale) -> bool {
        self.navigation.read().await.contains_key(locale)
    }
}
