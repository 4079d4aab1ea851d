// tests/support/helpers.rs
use std::sync::Arc;

use cms_slug::application::services::{ApplicationServices, SlugPorts};
use cms_slug::domain::slug::services::SlugPostModifier;
use cms_slug::domain::slug::{Record, SlugConfiguration, TableSchema};
use cms_slug::infrastructure::repositories::{PageTree, StoreLiveVersionResolver};
use cms_slug::infrastructure::util::DeunicodeTransliterator;

use super::mocks::InMemoryRecordStore;

/// Page configuration used by most scenarios: nav title falling back to
/// title, nested under the parent page slug.
pub fn pages_config() -> SlugConfiguration {
    SlugConfiguration::from_json(
        r#"{
            "table": {
                "name": "pages",
                "languageField": "language_id",
                "translationParentField": "l10n_parent",
                "deletedField": "deleted",
                "workspaceAware": true
            },
            "options": {
                "generatorOptions": {
                    "fields": ["nav_title,title"],
                    "prefixParentPageSlug": true
                }
            }
        }"#,
    )
    .unwrap()
}

pub struct Harness {
    pub store: Arc<InMemoryRecordStore>,
    pub services: ApplicationServices,
}

pub fn harness(config: SlugConfiguration, pages: Vec<Record>) -> Harness {
    harness_with(config, pages, |tree| tree, Vec::new())
}

pub fn harness_with(
    config: SlugConfiguration,
    pages: Vec<Record>,
    customize_tree: impl FnOnce(PageTree) -> PageTree,
    post_modifiers: Vec<Arc<dyn SlugPostModifier>>,
) -> Harness {
    let store = Arc::new(InMemoryRecordStore::with_rows("pages", pages));
    let tree = Arc::new(customize_tree(
        PageTree::new(store.clone(), TableSchema::pages()).with_workspace(config.workspace_id),
    ));

    let services = ApplicationServices::with_post_modifiers(
        config,
        SlugPorts {
            store: store.clone(),
            writer: store.clone(),
            sites: tree.clone(),
            versions: Arc::new(StoreLiveVersionResolver::new(store.clone())),
            parents: tree,
            transliterator: Arc::new(DeunicodeTransliterator),
        },
        post_modifiers,
    )
    .unwrap();

    Harness { store, services }
}
