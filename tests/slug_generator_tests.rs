use std::sync::Arc;

mod support;

use cms_slug::application::commands::slugs::GenerateSlugCommand;
use cms_slug::application::error::ApplicationError;
use cms_slug::domain::errors::DomainError;
use cms_slug::domain::slug::services::{SlugPostModifier, short_hash};
use cms_slug::domain::slug::{LanguageId, Record, SlugConfiguration, WorkspaceId};

use support::{Harness, SuffixModifier, harness, harness_with, page, pages_config};

fn page_tree() -> Vec<Record> {
    vec![
        page(1, 0).title("Home").slug("/").site_root().build(),
        page(2, 1).title("Products").slug("/products").build(),
        page(3, 2).title("Shoes").build(),
        page(4, 1).title("Storage").slug("/storage").doktype(254).build(),
        page(5, 1).title("Produkte").slug("/produkte").translation_of(2, 1).build(),
    ]
}

async fn generate(h: &Harness, record: Record) -> Result<String, ApplicationError> {
    h.services
        .slug_commands
        .generate(GenerateSlugCommand { record, pid: None })
        .await
        .map(|dto| dto.slug)
}

#[tokio::test]
async fn site_root_and_top_level_records_get_root_slug() {
    let h = harness(pages_config(), page_tree());

    let root = page(9, 5).title("Microsite").site_root().build();
    assert_eq!(generate(&h, root).await.unwrap(), "/");

    let top_level = page(9, 0).title("Anything").build();
    assert_eq!(generate(&h, top_level).await.unwrap(), "/");
}

#[tokio::test]
async fn nav_title_wins_over_title() {
    let h = harness(pages_config(), page_tree());

    let record = page(9, 1).nav_title("Team").title("Our Team").build();
    assert_eq!(generate(&h, record).await.unwrap(), "/team");

    let record = page(9, 1).title("Our Team").build();
    assert_eq!(generate(&h, record).await.unwrap(), "/our-team");
}

#[tokio::test]
async fn parent_slug_is_prefixed() {
    let h = harness(pages_config(), page_tree());

    let record = page(9, 2).title("Gift Cards").build();
    assert_eq!(generate(&h, record).await.unwrap(), "/products/gift-cards");
}

#[tokio::test]
async fn parent_without_slug_is_generated_first() {
    let h = harness(pages_config(), page_tree());

    let record = page(9, 3).title("Running").build();
    assert_eq!(
        generate(&h, record).await.unwrap(),
        "/products/shoes/running"
    );
}

#[tokio::test]
async fn explicit_pid_overrides_record_pid() {
    let h = harness(pages_config(), page_tree());

    let dto = h
        .services
        .slug_commands
        .generate(GenerateSlugCommand {
            record: page(9, 1).title("Sale").build(),
            pid: Some(2),
        })
        .await
        .unwrap();
    assert_eq!(dto.slug, "/products/sale");
}

#[tokio::test]
async fn folders_do_not_contribute_a_segment() {
    let h = harness(pages_config(), page_tree());

    let record = page(9, 4).title("Item").build();
    assert_eq!(generate(&h, record).await.unwrap(), "/item");
}

#[tokio::test]
async fn translated_records_use_localized_parent() {
    let h = harness(pages_config(), page_tree());

    let record = page(9, 2).title("Schuhe").translation_of(3, 1).build();
    assert_eq!(generate(&h, record).await.unwrap(), "/produkte/schuhe");

    // no translation in language 2 and no fallback configured
    let record = page(10, 2).title("Zapatos").translation_of(3, 2).build();
    assert_eq!(generate(&h, record).await.unwrap(), "/products/zapatos");
}

#[tokio::test]
async fn fallback_languages_supply_the_parent_translation() {
    let h = harness_with(
        pages_config(),
        page_tree(),
        |tree| tree.with_language_fallbacks(LanguageId(2), [LanguageId(1)]),
        Vec::new(),
    );

    let record = page(10, 2).title("Schuhe").translation_of(3, 2).build();
    assert_eq!(generate(&h, record).await.unwrap(), "/produkte/schuhe");
}

#[tokio::test]
async fn empty_record_gets_default_hash_slug() {
    let h = harness(pages_config(), page_tree());

    let record = Record::new().with("uid", 77).with("pid", 1);
    let fingerprint = serde_json::to_string(&record).unwrap();
    assert_eq!(
        generate(&h, record).await.unwrap(),
        format!("/default-{}", short_hash(&fingerprint))
    );
}

#[tokio::test]
async fn cyclic_parents_are_reported() {
    let h = harness(
        pages_config(),
        vec![page(50, 51).title("A").build(), page(51, 50).title("B").build()],
    );

    let err = generate(&h, page(9, 50).title("Leaf").build())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::CyclicContainment(_))
    ));
}

#[tokio::test]
async fn post_modifiers_run_before_final_sanitize() {
    let h = harness_with(
        pages_config(),
        page_tree(),
        |tree| tree,
        vec![Arc::new(SuffixModifier("Detail View")) as Arc<dyn SlugPostModifier>],
    );

    let record = page(9, 2).title("Boots").build();
    assert_eq!(
        generate(&h, record).await.unwrap(),
        "/products/boots/detail-view"
    );
}

#[tokio::test]
async fn fields_are_joined_and_replaced() {
    let config = SlugConfiguration::from_json(
        r#"{
            "table": {"name": "tx_news", "deletedField": "deleted"},
            "options": {
                "generatorOptions": {
                    "fields": ["title", "subtitle"],
                    "fieldSeparator": "-",
                    "replacements": {"&": "and", "(new)": ""}
                }
            }
        }"#,
    )
    .unwrap();
    let h = harness(config, page_tree());

    let record = Record::new()
        .with("uid", 3)
        .with("pid", 2)
        .with("title", "Salt & Pepper (new)")
        .with("subtitle", "Spring");
    assert_eq!(
        generate(&h, record).await.unwrap(),
        "/salt-and-pepper-spring"
    );

    let record = Record::new()
        .with("uid", 4)
        .with("pid", 2)
        .with("title", "")
        .with("subtitle", "Only Subtitle");
    assert_eq!(generate(&h, record).await.unwrap(), "/only-subtitle");
}

#[tokio::test]
async fn workspace_versions_of_parents_supply_the_prefix() {
    let mut pages = page_tree();
    pages.push(page(35, 1).title("Catalog").slug("/catalog").in_workspace(5, 2).build());
    pages.push(page(36, 1).slug("/storage").in_workspace(5, 4).delete_placeholder().build());

    let live = harness(pages_config(), pages.clone());
    let record = page(9, 2).title("Boots").build();
    assert_eq!(generate(&live, record.clone()).await.unwrap(), "/products/boots");

    let draft = harness(pages_config().with_workspace(WorkspaceId(5)), pages);
    assert_eq!(generate(&draft, record).await.unwrap(), "/catalog/boots");

    // the folder is deleted in the workspace, so the rootline ends there
    let record = page(10, 4).title("Item").build();
    assert_eq!(generate(&draft, record).await.unwrap(), "/item");
}
