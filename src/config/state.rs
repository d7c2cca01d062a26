// Application state module
// Holds the immutable per-process pieces every request needs

use std::path::Path;
use std::sync::Arc;

use super::types::Config;
use crate::dashboard::error::TemplateError;
use crate::dashboard::{
    load_templates, FragmentStore, FreshnessSource, FsFragmentStore, FsFreshnessSource,
    LocationResolver, PageAssembler, PageTemplateDescriptor,
};

/// Application state
pub struct AppState {
    pub config: Config,
    pub templates: Vec<PageTemplateDescriptor>,
    pub resolver: LocationResolver,
    pub assembler: PageAssembler,
}

impl AppState {
    /// Build state backed by the filesystem paths in `config.dashboard`
    pub fn new(config: &Config) -> Result<Self, TemplateError> {
        let store = Arc::new(FsFragmentStore::new(&config.dashboard.fragment_dir));
        Self::with_sources(config, store, Arc::new(FsFreshnessSource))
    }

    /// Build state with explicit fragment and freshness collaborators
    pub fn with_sources(
        config: &Config,
        store: Arc<dyn FragmentStore>,
        freshness: Arc<dyn FreshnessSource>,
    ) -> Result<Self, TemplateError> {
        let templates = load_templates(
            &config.dashboard.pages,
            Path::new(&config.dashboard.data_source),
        )?;

        Ok(Self {
            config: config.clone(),
            templates,
            resolver: LocationResolver::new(&config.dashboard.default_location),
            assembler: PageAssembler::new(store, freshness),
        })
    }

    /// Template served on `path`, if any
    pub fn template_for(&self, path: &str) -> Option<&PageTemplateDescriptor> {
        self.templates.iter().find(|t| t.path == path)
    }
}
