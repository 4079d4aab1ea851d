// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{commands::slugs::SlugCommandService, error::ApplicationResult, ports::TransliteratorPort},
    domain::slug::{
        LiveVersionResolver, ParentRecordLookup, RecordStore, RecordWriter, SiteResolver,
        SlugConfiguration,
        services::{SlugGeneratorService, SlugNormalizer, SlugPostModifier, SlugUniquenessService},
    },
};

/// Collaborators the slug services are wired from.
pub struct SlugPorts {
    pub store: Arc<dyn RecordStore>,
    pub writer: Arc<dyn RecordWriter>,
    pub sites: Arc<dyn SiteResolver>,
    pub versions: Arc<dyn LiveVersionResolver>,
    pub parents: Arc<dyn ParentRecordLookup>,
    pub transliterator: Arc<TransliteratorPort>,
}

pub struct ApplicationServices {
    pub slug_commands: Arc<SlugCommandService>,
    pub uniqueness: Arc<SlugUniquenessService>,
    pub normalizer: Arc<SlugNormalizer>,
}

impl ApplicationServices {
    pub fn new(config: SlugConfiguration, ports: SlugPorts) -> ApplicationResult<Self> {
        Self::with_post_modifiers(config, ports, Vec::new())
    }

    pub fn with_post_modifiers(
        config: SlugConfiguration,
        ports: SlugPorts,
        post_modifiers: Vec<Arc<dyn SlugPostModifier>>,
    ) -> ApplicationResult<Self> {
        let config = Arc::new(config);
        let normalizer = Arc::new(SlugNormalizer::new(
            config.fallback_character(),
            Arc::clone(&ports.transliterator),
        )?);

        let generator = post_modifiers.into_iter().fold(
            SlugGeneratorService::new(
                Arc::clone(&config),
                Arc::clone(&normalizer),
                Arc::clone(&ports.parents),
                Arc::clone(&ports.sites),
            ),
            SlugGeneratorService::with_post_modifier,
        );

        let uniqueness = Arc::new(SlugUniquenessService::new(
            Arc::clone(&config),
            Arc::clone(&normalizer),
            Arc::clone(&ports.store),
            Arc::clone(&ports.sites),
            Arc::clone(&ports.versions),
        ));

        let slug_commands = Arc::new(SlugCommandService::new(
            Arc::clone(&config),
            Arc::clone(&normalizer),
            Arc::new(generator),
            Arc::clone(&uniqueness),
            Arc::clone(&ports.store),
            Arc::clone(&ports.writer),
        ));

        Ok(Self {
            slug_commands,
            uniqueness,
            normalizer,
        })
    }
}
