//! All synced collections of the site, wired to their storage keys.

use parking_lot::Mutex;
use std::{collections::HashMap, sync::Arc};

use crate::content::{
    Concept, CustomCategory, Icon, JourneyEntry, Project, SkillGroup,
    defaults::{self, builtin_category},
};
use crate::sync::{MergePolicy, SeedPolicy, SyncEngine, SyncedDoc, SyncedList};
use crate::tabs::{self, Tab};

pub const RESUME_KEY: &str = "resume_link";
pub const ARSENAL_KEY: &str = "arsenal";
pub const JOURNEY_KEY: &str = "journey";
pub const CUSTOM_CATEGORIES_KEY: &str = "custom_categories";

/// Link used when no resume override is stored.
pub const BUNDLED_RESUME_HREF: &str = "/resume";

pub fn project_collection_key(storage_key: &str) -> String {
    format!("category_{storage_key}")
}

/// A category tab as rendered, whether built-in or admin-created.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub title: String,
    pub description: String,
    pub icon: Icon,
    pub color_theme: String,
    pub storage_key: String,
    pub concepts: Vec<Concept>,
}

impl From<&CustomCategory> for Category {
    fn from(c: &CustomCategory) -> Self {
        Self {
            title: c.title.clone(),
            description: c.description.clone(),
            icon: c.icon.clone(),
            color_theme: c.color_theme.clone(),
            storage_key: c.storage_key.clone(),
            concepts: c.concepts.clone(),
        }
    }
}

pub struct Portfolio {
    engine: SyncEngine,
    pub resume: SyncedDoc<String>,
    pub arsenal: Arc<SyncedList<SkillGroup>>,
    pub journey: Arc<SyncedList<JourneyEntry>>,
    pub custom_categories: SyncedDoc<Vec<CustomCategory>>,
    projects: Mutex<HashMap<String, Arc<SyncedList<Project>>>>,
}

impl Portfolio {
    pub fn new(engine: SyncEngine) -> Self {
        Self {
            resume: engine.document(RESUME_KEY, "link", String::new(), SeedPolicy::Never),
            arsenal: Arc::new(engine.list(ARSENAL_KEY, defaults::arsenal(), MergePolicy::Append)),
            journey: Arc::new(engine.list(
                JOURNEY_KEY,
                defaults::journey(),
                MergePolicy::Prepend,
            )),
            custom_categories: engine.document(
                CUSTOM_CATEGORIES_KEY,
                "data",
                Vec::new(),
                SeedPolicy::Never,
            ),
            projects: Mutex::new(HashMap::new()),
            engine,
        }
    }

    pub fn engine(&self) -> &SyncEngine {
        &self.engine
    }

    /// Collections every page needs (the navigation bar).
    pub async fn mount_shell(&self) {
        self.custom_categories.mount().await;
    }

    /// Collections shown on the About page.
    pub async fn mount_about(&self) {
        tokio::join!(
            self.resume.mount(),
            self.arsenal.mount(),
            self.journey.mount()
        );
    }

    pub fn tabs(&self) -> Vec<Tab> {
        self.custom_categories.read(|custom| tabs::tabs(custom))
    }

    /// The stored resume link, or the bundled file when none is set.
    pub fn resume_href(&self) -> String {
        self.resume.read(|link| {
            if link.is_empty() {
                BUNDLED_RESUME_HREF.to_string()
            } else {
                link.clone()
            }
        })
    }

    /// Built-in categories win; among custom ones the first created wins.
    pub fn category(&self, storage_key: &str) -> Option<Category> {
        if let Some(b) = builtin_category(storage_key) {
            return Some(Category {
                title: b.title.to_string(),
                description: b.description.to_string(),
                icon: Icon::parse(b.icon),
                color_theme: b.color_theme.to_string(),
                storage_key: b.storage_key.to_string(),
                concepts: b.concepts(),
            });
        }
        self.custom_categories.read(|custom| {
            custom
                .iter()
                .find(|c| c.storage_key == storage_key)
                .map(Category::from)
        })
    }

    /// The project list of a known category, created on first use.
    pub fn projects(&self, storage_key: &str) -> Option<Arc<SyncedList<Project>>> {
        let category = self.category(storage_key)?;
        let mut projects = self.projects.lock();
        let list = projects
            .entry(category.storage_key.clone())
            .or_insert_with(|| {
                let initial = builtin_category(&category.storage_key)
                    .map(|b| b.initial_projects())
                    .unwrap_or_default();
                Arc::new(self.engine.list(
                    project_collection_key(&category.storage_key),
                    initial,
                    MergePolicy::Prepend,
                ))
            });
        Some(list.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn portfolio() -> (Arc<MemoryStore>, Portfolio) {
        let store = Arc::new(MemoryStore::new());
        let portfolio = Portfolio::new(SyncEngine::new(store.clone()));
        (store, portfolio)
    }

    #[tokio::test]
    async fn resume_falls_back_to_bundled_file() {
        let (_, portfolio) = portfolio();
        portfolio.mount_about().await;
        assert_eq!(portfolio.resume_href(), "/resume");

        drop(portfolio.resume.mutate("https://drive.example/cv".into()));
        assert_eq!(portfolio.resume_href(), "https://drive.example/cv");
    }

    #[tokio::test]
    async fn builtin_category_projects_seed_initial_list() {
        let (store, portfolio) = portfolio();
        let list = portfolio.projects("se_projects").unwrap();
        list.mount().await;
        portfolio.engine().flush().await;

        assert_eq!(list.snapshot().len(), 2);
        let stored = store.raw("category_se_projects").await.unwrap();
        assert_eq!(stored["data"][0]["id"], json!("se1"));
    }

    #[tokio::test]
    async fn unknown_category_has_no_projects() {
        let (_, portfolio) = portfolio();
        portfolio.mount_shell().await;
        assert!(portfolio.projects("nope_projects").is_none());
    }

    #[tokio::test]
    async fn custom_category_resolves_after_mount() {
        let (store, portfolio) = portfolio();
        store
            .insert_raw(
                CUSTOM_CATEGORIES_KEY,
                json!({ "data": [{ "title": "Design", "storageKey": "design_projects" }] }),
            )
            .await;
        portfolio.mount_shell().await;

        let category = portfolio.category("design_projects").unwrap();
        assert_eq!(category.title, "Design");
        assert!(portfolio.projects("design_projects").unwrap().snapshot().is_empty());
        assert_eq!(portfolio.tabs().last().unwrap().label, "Design");
    }

    #[tokio::test]
    async fn project_lists_are_shared_per_key() {
        let (_, portfolio) = portfolio();
        let a = portfolio.projects("ai_projects").unwrap();
        let b = portfolio.projects("ai_projects").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
