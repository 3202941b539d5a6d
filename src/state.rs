use crate::services::{bug_store::BugStore, template_service::TemplateService};

/// Shared handles passed to every handler through axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: BugStore,
    pub templates: TemplateService,
}

impl AppState {
    pub fn new(store: BugStore, templates: TemplateService) -> Self {
        Self { store, templates }
    }
}
