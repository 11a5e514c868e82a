//! Administrative command pipeline for discount policies.
//!
//! ```text
//! PolicyCommand
//!   -> load current policy (or an empty one)
//!   -> optimistic version check
//!   -> handle + apply
//!   -> save (or remove, once deleted)
//!   -> publish committed events
//! ```

use thiserror::Error;

use salesguard_core::{AggregateRoot, DomainError, ExpectedVersion};
use salesguard_events::{EventBus, execute};

use crate::policy::{DiscountPolicy, PolicyCommand, PolicyEvent, PolicyId};
use crate::repository::RuleRepository;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// Publication failed after the policy was stored.
    #[error("publish failed: {0}")]
    Publish(String),
}

impl AdminError {
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            AdminError::Domain(e) => Some(e),
            AdminError::Publish(_) => None,
        }
    }
}

/// Executes policy commands against a rule repository.
#[derive(Debug)]
pub struct PolicyAdmin<R, B> {
    rules: R,
    bus: B,
}

impl<R, B> PolicyAdmin<R, B> {
    pub fn new(rules: R, bus: B) -> Self {
        Self { rules, bus }
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }
}

impl<R, B> PolicyAdmin<R, B>
where
    R: RuleRepository,
    B: EventBus<PolicyEvent>,
{
    /// Run one command. On success the repository reflects the new policy
    /// state before any event is published.
    pub fn execute(&self, command: PolicyCommand, expected: ExpectedVersion) -> Result<Vec<PolicyEvent>, AdminError> {
        let policy_id = command.policy_id();
        let mut policy = self
            .rules
            .load(policy_id)
            .unwrap_or_else(|| DiscountPolicy::empty(policy_id));

        expected.check(policy.version())?;
        let events = execute(&mut policy, &command)?;

        if policy.is_deleted() {
            self.rules.remove(policy_id);
        } else {
            self.rules.save(policy)?;
        }

        for event in &events {
            tracing::info!(
                policy_id = %policy_id,
                event_type = salesguard_events::Event::event_type(event),
                "discount policy changed"
            );
            self.bus
                .publish(event.clone())
                .map_err(|e| AdminError::Publish(format!("{e:?}")))?;
        }

        Ok(events)
    }

    pub fn policy(&self, policy_id: PolicyId) -> Option<DiscountPolicy> {
        self.rules.load(policy_id)
    }

    pub fn policies(&self) -> Vec<DiscountPolicy> {
        self.rules.list()
    }
}
