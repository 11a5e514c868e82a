use serde::{Deserialize, Serialize};

use salesguard_core::{DomainError, DomainResult, Entity, uuid_id};

uuid_id!(
    /// Client type identifier.
    ClientTypeId,
    "ClientTypeId"
);

/// Customer category label (e.g. "Retail", "Wholesale").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientType {
    id: ClientTypeId,
    name: String,
    description: Option<String>,
}

impl ClientType {
    pub fn new(id: ClientTypeId, name: impl Into<String>, description: Option<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("client type name cannot be empty"));
        }
        Ok(Self {
            id,
            name,
            description: description.filter(|d| !d.trim().is_empty()),
        })
    }

    pub fn id_typed(&self) -> ClientTypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Entity for ClientType {
    type Id = ClientTypeId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_rejected() {
        let err = ClientType::new(ClientTypeId::new(), "   ", None).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn blank_description_is_dropped() {
        let t = ClientType::new(ClientTypeId::new(), "Retail", Some(" ".to_string())).unwrap();
        assert_eq!(t.name(), "Retail");
        assert_eq!(t.description(), None);
    }
}
