//! Reusable description templates.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, TimelogError};
use crate::storage::{PersistenceGateway, TEMPLATES_KEY};

/// Opaque template identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named description that can pre-fill the entry form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
}

/// Ordered template collection, oldest first.
pub struct TemplateStore {
    templates: Vec<Template>,
    gateway: PersistenceGateway,
    persisted: bool,
}

impl TemplateStore {
    /// Load the persisted templates.
    pub fn load(gateway: PersistenceGateway) -> Self {
        let templates = gateway.load_collection(TEMPLATES_KEY);
        Self {
            templates,
            gateway,
            persisted: true,
        }
    }

    /// Add a template named `name` (trimmed) at the end of the list.
    ///
    /// # Errors
    ///
    /// Returns `TimelogError::Validation` if the trimmed name is empty.
    pub fn add(&mut self, name: &str) -> Result<Template> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TimelogError::Validation(
                "Please enter template name".to_string(),
            ));
        }

        let mut id = TemplateId::generate();
        while self.get(&id).is_some() {
            id = TemplateId::generate();
        }

        let template = Template {
            id,
            name: name.to_string(),
        };
        self.templates.push(template.clone());
        self.save();
        Ok(template)
    }

    /// Remove the template with `id`. Absent ids are a no-op.
    ///
    /// Returns whether a template was removed.
    pub fn remove(&mut self, id: &TemplateId) -> bool {
        let before = self.templates.len();
        self.templates.retain(|template| &template.id != id);
        let removed = self.templates.len() != before;
        self.save();
        removed
    }

    pub fn get(&self, id: &TemplateId) -> Option<&Template> {
        self.templates.iter().find(|template| &template.id == id)
    }

    pub fn list(&self) -> &[Template] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Whether the last save reached the backend.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    fn save(&mut self) {
        self.persisted = self.gateway.save_collection(TEMPLATES_KEY, &self.templates);
    }
}
