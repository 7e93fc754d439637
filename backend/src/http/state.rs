//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::PolicyConfig;
use crate::db::repository::FullRepository;
use crate::services::{AnimalService, CategoryService, EnclosureService, ZooService};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for database operations
    pub repository: Arc<dyn FullRepository>,
    /// Delete behaviour for categories and enclosures
    pub policy: PolicyConfig,
}

impl AppState {
    /// Create a new application state with the default delete policy.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self {
            repository,
            policy: PolicyConfig::default(),
        }
    }

    pub fn with_policy(mut self, policy: PolicyConfig) -> Self {
        self.policy = policy;
        self
    }

    pub fn animals(&self) -> AnimalService<'_> {
        AnimalService::new(self.repository.as_ref())
    }

    pub fn categories(&self) -> CategoryService<'_> {
        CategoryService::new(self.repository.as_ref())
            .with_delete_behavior(self.policy.category_delete)
    }

    pub fn enclosures(&self) -> EnclosureService<'_> {
        EnclosureService::new(self.repository.as_ref())
            .with_delete_policy(self.policy.enclosure_delete)
    }

    pub fn zoos(&self) -> ZooService<'_> {
        ZooService::new(self.repository.as_ref())
    }
}
