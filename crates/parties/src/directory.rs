use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use salesguard_core::{DomainError, DomainResult};

use crate::client_type::{ClientType, ClientTypeId};
use crate::customer::{Customer, PartyId};

/// Read access to customers and client types.
pub trait CustomerDirectory: Send + Sync {
    fn customer(&self, id: PartyId) -> Option<Customer>;
    fn client_type(&self, id: ClientTypeId) -> Option<ClientType>;
}

impl<D> CustomerDirectory for Arc<D>
where
    D: CustomerDirectory + ?Sized,
{
    fn customer(&self, id: PartyId) -> Option<Customer> {
        (**self).customer(id)
    }

    fn client_type(&self, id: ClientTypeId) -> Option<ClientType> {
        (**self).client_type(id)
    }
}

/// In-memory directory for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    customers: RwLock<HashMap<PartyId, Customer>>,
    client_types: RwLock<HashMap<ClientTypeId, ClientType>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_client_type(&self, client_type: ClientType) {
        if let Ok(mut map) = self.client_types.write() {
            map.insert(client_type.id_typed(), client_type);
        }
    }

    /// Insert or replace a customer. A referenced client type must exist.
    pub fn upsert_customer(&self, customer: Customer) -> DomainResult<()> {
        if let Some(t) = customer.client_type()
            && self.client_type(t).is_none()
        {
            return Err(DomainError::validation(format!("unknown client type {t}")));
        }
        let mut map = self
            .customers
            .write()
            .map_err(|_| DomainError::conflict("customer directory lock poisoned"))?;
        map.insert(customer.id_typed(), customer);
        Ok(())
    }
}

impl CustomerDirectory for InMemoryDirectory {
    fn customer(&self, id: PartyId) -> Option<Customer> {
        self.customers.read().ok()?.get(&id).cloned()
    }

    fn client_type(&self, id: ClientTypeId) -> Option<ClientType> {
        self.client_types.read().ok()?.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_with_unknown_client_type_is_rejected() {
        let dir = InMemoryDirectory::new();
        let customer = Customer::new(PartyId::new(), "Acme")
            .unwrap()
            .with_client_type(ClientTypeId::new());

        assert!(dir.upsert_customer(customer).unwrap_err().is_validation());
    }

    #[test]
    fn stored_customer_is_found_with_its_type() {
        let dir = InMemoryDirectory::new();
        let wholesale = ClientType::new(ClientTypeId::new(), "Wholesale", None).unwrap();
        let type_id = wholesale.id_typed();
        dir.add_client_type(wholesale);

        let customer = Customer::new(PartyId::new(), "Acme").unwrap().with_client_type(type_id);
        let id = customer.id_typed();
        dir.upsert_customer(customer).unwrap();

        let found = dir.customer(id).unwrap();
        assert_eq!(found.client_type(), Some(type_id));
        assert_eq!(dir.client_type(type_id).unwrap().name(), "Wholesale");
    }
}
