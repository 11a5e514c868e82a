use serde::{Deserialize, Serialize};

use salesguard_core::{DomainError, DomainResult, Entity, uuid_id};

use crate::client_type::ClientTypeId;

uuid_id!(
    /// Party (customer) identifier.
    PartyId,
    "PartyId"
);

/// A customer as seen by the sales documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: PartyId,
    name: String,
    client_type: Option<ClientTypeId>,
}

impl Customer {
    pub fn new(id: PartyId, name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("customer name cannot be empty"));
        }
        Ok(Self {
            id,
            name,
            client_type: None,
        })
    }

    pub fn with_client_type(mut self, client_type: ClientTypeId) -> Self {
        self.client_type = Some(client_type);
        self
    }

    pub fn id_typed(&self) -> PartyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn client_type(&self) -> Option<ClientTypeId> {
        self.client_type
    }
}

impl Entity for Customer {
    type Id = PartyId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
