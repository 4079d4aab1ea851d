// src/application/commands/slugs/service.rs
use std::sync::Arc;

use crate::domain::slug::{
    RecordStore, RecordWriter, SlugConfiguration,
    services::{SlugGeneratorService, SlugNormalizer, SlugUniquenessService},
};

pub struct SlugCommandService {
    pub(super) config: Arc<SlugConfiguration>,
    pub(super) normalizer: Arc<SlugNormalizer>,
    pub(super) generator: Arc<SlugGeneratorService>,
    pub(super) uniqueness: Arc<SlugUniquenessService>,
    pub(super) store: Arc<dyn RecordStore>,
    pub(super) writer: Arc<dyn RecordWriter>,
}

impl SlugCommandService {
    pub fn new(
        config: Arc<SlugConfiguration>,
        normalizer: Arc<SlugNormalizer>,
        generator: Arc<SlugGeneratorService>,
        uniqueness: Arc<SlugUniquenessService>,
        store: Arc<dyn RecordStore>,
        writer: Arc<dyn RecordWriter>,
    ) -> Self {
        Self {
            config,
            normalizer,
            generator,
            uniqueness,
            store,
            writer,
        }
    }

    pub fn configuration(&self) -> &SlugConfiguration {
        &self.config
    }
}
