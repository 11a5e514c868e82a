use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use salesguard_core::{Aggregate, AggregateRoot, DomainError, uuid_id};
use salesguard_events::Event;

use crate::rule::{DiscountRule, RuleId, RuleSpec};

uuid_id!(
    /// Discount policy identifier.
    PolicyId,
    "PolicyId"
);

/// Aggregate root: DiscountPolicy.
///
/// Owns its rules. Rules are kept in canonical order (ascending minimum
/// quantity). Deleting the policy deletes the rules with it.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountPolicy {
    id: PolicyId,
    name: String,
    active: bool,
    rules: Vec<DiscountRule>,
    version: u64,
    created: bool,
    deleted: bool,
}

impl DiscountPolicy {
    /// Create an empty, not-yet-created aggregate instance.
    pub fn empty(id: PolicyId) -> Self {
        Self {
            id,
            name: String::new(),
            active: true,
            rules: Vec::new(),
            version: 0,
            created: false,
            deleted: false,
        }
    }

    pub fn id_typed(&self) -> PolicyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn rules(&self) -> &[DiscountRule] {
        &self.rules
    }

    pub fn rule(&self, rule_id: RuleId) -> Option<&DiscountRule> {
        self.rules.iter().find(|r| r.id_typed() == rule_id)
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }
}

impl AggregateRoot for DiscountPolicy {
    type Id = PolicyId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreatePolicy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePolicy {
    pub policy_id: PolicyId,
    pub name: String,
    pub active: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RenamePolicy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenamePolicy {
    pub policy_id: PolicyId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ActivatePolicy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivatePolicy {
    pub policy_id: PolicyId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DeactivatePolicy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeactivatePolicy {
    pub policy_id: PolicyId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddRule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddRule {
    pub policy_id: PolicyId,
    pub rule_id: RuleId,
    pub spec: RuleSpec,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateRule (replaces every attribute of an existing rule).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRule {
    pub policy_id: PolicyId,
    pub rule_id: RuleId,
    pub spec: RuleSpec,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveRule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveRule {
    pub policy_id: PolicyId,
    pub rule_id: RuleId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DeletePolicy (cascades to every rule).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletePolicy {
    pub policy_id: PolicyId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PolicyCommand {
    CreatePolicy(CreatePolicy),
    RenamePolicy(RenamePolicy),
    ActivatePolicy(ActivatePolicy),
    DeactivatePolicy(DeactivatePolicy),
    AddRule(AddRule),
    UpdateRule(UpdateRule),
    RemoveRule(RemoveRule),
    DeletePolicy(DeletePolicy),
}

impl PolicyCommand {
    pub fn policy_id(&self) -> PolicyId {
        match self {
            PolicyCommand::CreatePolicy(c) => c.policy_id,
            PolicyCommand::RenamePolicy(c) => c.policy_id,
            PolicyCommand::ActivatePolicy(c) => c.policy_id,
            PolicyCommand::DeactivatePolicy(c) => c.policy_id,
            PolicyCommand::AddRule(c) => c.policy_id,
            PolicyCommand::UpdateRule(c) => c.policy_id,
            PolicyCommand::RemoveRule(c) => c.policy_id,
            PolicyCommand::DeletePolicy(c) => c.policy_id,
        }
    }
}

/// Event: PolicyCreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyCreated {
    pub policy_id: PolicyId,
    pub name: String,
    pub active: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PolicyRenamed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRenamed {
    pub policy_id: PolicyId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PolicyActivated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyActivated {
    pub policy_id: PolicyId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PolicyDeactivated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDeactivated {
    pub policy_id: PolicyId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: RuleAdded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleAdded {
    pub policy_id: PolicyId,
    pub rule: DiscountRule,
    pub occurred_at: DateTime<Utc>,
}

/// Event: RuleUpdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleUpdated {
    pub policy_id: PolicyId,
    pub rule: DiscountRule,
    pub occurred_at: DateTime<Utc>,
}

/// Event: RuleRemoved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleRemoved {
    pub policy_id: PolicyId,
    pub rule_id: RuleId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PolicyDeleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDeleted {
    pub policy_id: PolicyId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PolicyEvent {
    PolicyCreated(PolicyCreated),
    PolicyRenamed(PolicyRenamed),
    PolicyActivated(PolicyActivated),
    PolicyDeactivated(PolicyDeactivated),
    RuleAdded(RuleAdded),
    RuleUpdated(RuleUpdated),
    RuleRemoved(RuleRemoved),
    PolicyDeleted(PolicyDeleted),
}

impl Event for PolicyEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PolicyEvent::PolicyCreated(_) => "discounts.policy.created",
            PolicyEvent::PolicyRenamed(_) => "discounts.policy.renamed",
            PolicyEvent::PolicyActivated(_) => "discounts.policy.activated",
            PolicyEvent::PolicyDeactivated(_) => "discounts.policy.deactivated",
            PolicyEvent::RuleAdded(_) => "discounts.policy.rule_added",
            PolicyEvent::RuleUpdated(_) => "discounts.policy.rule_updated",
            PolicyEvent::RuleRemoved(_) => "discounts.policy.rule_removed",
            PolicyEvent::PolicyDeleted(_) => "discounts.policy.deleted",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            PolicyEvent::PolicyCreated(e) => e.occurred_at,
            PolicyEvent::PolicyRenamed(e) => e.occurred_at,
            PolicyEvent::PolicyActivated(e) => e.occurred_at,
            PolicyEvent::PolicyDeactivated(e) => e.occurred_at,
            PolicyEvent::RuleAdded(e) => e.occurred_at,
            PolicyEvent::RuleUpdated(e) => e.occurred_at,
            PolicyEvent::RuleRemoved(e) => e.occurred_at,
            PolicyEvent::PolicyDeleted(e) => e.occurred_at,
        }
    }
}

impl Aggregate for DiscountPolicy {
    type Command = PolicyCommand;
    type Event = PolicyEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            PolicyEvent::PolicyCreated(e) => {
                self.id = e.policy_id;
                self.name = e.name.clone();
                self.active = e.active;
                self.rules.clear();
                self.created = true;
            }
            PolicyEvent::PolicyRenamed(e) => {
                self.name = e.name.clone();
            }
            PolicyEvent::PolicyActivated(_) => {
                self.active = true;
            }
            PolicyEvent::PolicyDeactivated(_) => {
                self.active = false;
            }
            PolicyEvent::RuleAdded(e) => {
                self.rules.push(e.rule.clone());
                self.rules.sort_by(DiscountRule::canonical_cmp);
            }
            PolicyEvent::RuleUpdated(e) => {
                if let Some(slot) = self.rules.iter_mut().find(|r| r.id_typed() == e.rule.id_typed()) {
                    *slot = e.rule.clone();
                }
                self.rules.sort_by(DiscountRule::canonical_cmp);
            }
            PolicyEvent::RuleRemoved(e) => {
                self.rules.retain(|r| r.id_typed() != e.rule_id);
            }
            PolicyEvent::PolicyDeleted(_) => {
                self.rules.clear();
                self.deleted = true;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        if self.deleted {
            return Err(DomainError::not_found());
        }
        match command {
            PolicyCommand::CreatePolicy(cmd) => self.handle_create(cmd),
            PolicyCommand::RenamePolicy(cmd) => self.handle_rename(cmd),
            PolicyCommand::ActivatePolicy(cmd) => self.handle_activate(cmd),
            PolicyCommand::DeactivatePolicy(cmd) => self.handle_deactivate(cmd),
            PolicyCommand::AddRule(cmd) => self.handle_add_rule(cmd),
            PolicyCommand::UpdateRule(cmd) => self.handle_update_rule(cmd),
            PolicyCommand::RemoveRule(cmd) => self.handle_remove_rule(cmd),
            PolicyCommand::DeletePolicy(cmd) => self.handle_delete(cmd),
        }
    }
}

impl DiscountPolicy {
    fn ensure_existing(&self, policy_id: PolicyId) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        if self.id != policy_id {
            return Err(DomainError::invariant("policy_id mismatch"));
        }
        Ok(())
    }

    fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("policy name cannot be empty"));
        }
        Ok(())
    }

    fn handle_create(&self, cmd: &CreatePolicy) -> Result<Vec<PolicyEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("discount policy already exists"));
        }
        Self::validate_name(&cmd.name)?;

        Ok(vec![PolicyEvent::PolicyCreated(PolicyCreated {
            policy_id: cmd.policy_id,
            name: cmd.name.trim().to_string(),
            active: cmd.active,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_rename(&self, cmd: &RenamePolicy) -> Result<Vec<PolicyEvent>, DomainError> {
        self.ensure_existing(cmd.policy_id)?;
        Self::validate_name(&cmd.name)?;

        Ok(vec![PolicyEvent::PolicyRenamed(PolicyRenamed {
            policy_id: cmd.policy_id,
            name: cmd.name.trim().to_string(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_activate(&self, cmd: &ActivatePolicy) -> Result<Vec<PolicyEvent>, DomainError> {
        self.ensure_existing(cmd.policy_id)?;
        if self.active {
            return Err(DomainError::invariant("policy is already active"));
        }

        Ok(vec![PolicyEvent::PolicyActivated(PolicyActivated {
            policy_id: cmd.policy_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_deactivate(&self, cmd: &DeactivatePolicy) -> Result<Vec<PolicyEvent>, DomainError> {
        self.ensure_existing(cmd.policy_id)?;
        if !self.active {
            return Err(DomainError::invariant("policy is already inactive"));
        }

        Ok(vec![PolicyEvent::PolicyDeactivated(PolicyDeactivated {
            policy_id: cmd.policy_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_add_rule(&self, cmd: &AddRule) -> Result<Vec<PolicyEvent>, DomainError> {
        self.ensure_existing(cmd.policy_id)?;
        if self.rule(cmd.rule_id).is_some() {
            return Err(DomainError::conflict(format!("rule {} already exists", cmd.rule_id)));
        }
        let rule = cmd.spec.build(cmd.rule_id)?;

        Ok(vec![PolicyEvent::RuleAdded(RuleAdded {
            policy_id: cmd.policy_id,
            rule,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update_rule(&self, cmd: &UpdateRule) -> Result<Vec<PolicyEvent>, DomainError> {
        self.ensure_existing(cmd.policy_id)?;
        if self.rule(cmd.rule_id).is_none() {
            return Err(DomainError::not_found());
        }
        let rule = cmd.spec.build(cmd.rule_id)?;

        Ok(vec![PolicyEvent::RuleUpdated(RuleUpdated {
            policy_id: cmd.policy_id,
            rule,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove_rule(&self, cmd: &RemoveRule) -> Result<Vec<PolicyEvent>, DomainError> {
        self.ensure_existing(cmd.policy_id)?;
        if self.rule(cmd.rule_id).is_none() {
            return Err(DomainError::not_found());
        }

        Ok(vec![PolicyEvent::RuleRemoved(RuleRemoved {
            policy_id: cmd.policy_id,
            rule_id: cmd.rule_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_delete(&self, cmd: &DeletePolicy) -> Result<Vec<PolicyEvent>, DomainError> {
        self.ensure_existing(cmd.policy_id)?;

        Ok(vec![PolicyEvent::PolicyDeleted(PolicyDeleted {
            policy_id: cmd.policy_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}
