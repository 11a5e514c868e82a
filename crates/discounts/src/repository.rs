//! Rule storage and filtered rule queries.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use salesguard_core::{DomainError, DomainResult};
use salesguard_parties::ClientTypeId;
use salesguard_products::{CategoryId, ProductId};

use crate::policy::{DiscountPolicy, PolicyId};
use crate::rule::DiscountRule;

/// Predicate set over rules, built from a pricing context.
///
/// A rule matches when its policy is active, its minimum quantity is reached
/// and each of its three axes admits the context value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleQuery {
    /// Client type of the customer, if any.
    pub client_type: Option<ClientTypeId>,
    pub product: ProductId,
    pub category: CategoryId,
    pub quantity: f64,
}

impl RuleQuery {
    pub fn matches(&self, record: &RuleRecord) -> bool {
        let rule = &record.rule;
        record.policy_active
            && rule.min_quantity() <= self.quantity
            && rule.client_type().admits(self.client_type.as_ref())
            && rule.product().admits(Some(&self.product))
            && rule.category().admits(Some(&self.category))
    }
}

/// A rule together with the state of its owning policy.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleRecord {
    pub policy_id: PolicyId,
    pub policy_active: bool,
    pub rule: DiscountRule,
}

/// Discount policy store.
pub trait RuleRepository: Send + Sync {
    /// Every rule matching `query`, in canonical order (ascending minimum
    /// quantity, then rule id).
    fn find_matching(&self, query: &RuleQuery) -> Vec<RuleRecord>;

    fn load(&self, policy_id: PolicyId) -> Option<DiscountPolicy>;

    /// Insert or replace a policy (and therefore all of its rules).
    fn save(&self, policy: DiscountPolicy) -> DomainResult<()>;

    /// Remove a policy and all of its rules.
    fn remove(&self, policy_id: PolicyId) -> Option<DiscountPolicy>;

    fn list(&self) -> Vec<DiscountPolicy>;
}

impl<R> RuleRepository for Arc<R>
where
    R: RuleRepository + ?Sized,
{
    fn find_matching(&self, query: &RuleQuery) -> Vec<RuleRecord> {
        (**self).find_matching(query)
    }

    fn load(&self, policy_id: PolicyId) -> Option<DiscountPolicy> {
        (**self).load(policy_id)
    }

    fn save(&self, policy: DiscountPolicy) -> DomainResult<()> {
        (**self).save(policy)
    }

    fn remove(&self, policy_id: PolicyId) -> Option<DiscountPolicy> {
        (**self).remove(policy_id)
    }

    fn list(&self) -> Vec<DiscountPolicy> {
        (**self).list()
    }
}

/// In-memory policy store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryRuleRepository {
    policies: RwLock<HashMap<PolicyId, DiscountPolicy>>,
}

impl InMemoryRuleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RuleRepository for InMemoryRuleRepository {
    fn find_matching(&self, query: &RuleQuery) -> Vec<RuleRecord> {
        let map = match self.policies.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };

        let mut records: Vec<RuleRecord> = map
            .values()
            .flat_map(|policy| {
                policy.rules().iter().map(move |rule| RuleRecord {
                    policy_id: policy.id_typed(),
                    policy_active: policy.is_active(),
                    rule: rule.clone(),
                })
            })
            .filter(|record| query.matches(record))
            .collect();
        records.sort_by(|a, b| a.rule.canonical_cmp(&b.rule));
        records
    }

    fn load(&self, policy_id: PolicyId) -> Option<DiscountPolicy> {
        self.policies.read().ok()?.get(&policy_id).cloned()
    }

    fn save(&self, policy: DiscountPolicy) -> DomainResult<()> {
        if !policy.is_created() || policy.is_deleted() {
            return Err(DomainError::invariant("only existing policies can be saved"));
        }
        let mut map = self
            .policies
            .write()
            .map_err(|_| DomainError::conflict("rule repository lock poisoned"))?;
        map.insert(policy.id_typed(), policy);
        Ok(())
    }

    fn remove(&self, policy_id: PolicyId) -> Option<DiscountPolicy> {
        self.policies.write().ok()?.remove(&policy_id)
    }

    fn list(&self) -> Vec<DiscountPolicy> {
        let map = match self.policies.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        let mut policies: Vec<DiscountPolicy> = map.values().cloned().collect();
        policies.sort_by_key(|p| p.id_typed());
        policies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{RuleId, RuleSpec};

    fn record(spec: RuleSpec, active: bool) -> RuleRecord {
        RuleRecord {
            policy_id: PolicyId::new(),
            policy_active: active,
            rule: spec.build(RuleId::new()).unwrap(),
        }
    }

    fn query(client_type: Option<ClientTypeId>, quantity: f64) -> RuleQuery {
        RuleQuery {
            client_type,
            product: ProductId::new(),
            category: CategoryId::new(),
            quantity,
        }
    }

    #[test]
    fn inactive_policy_never_matches() {
        let q = query(None, 100.0);
        assert!(q.matches(&record(RuleSpec::new(5.0).min_quantity(0.0), true)));
        assert!(!q.matches(&record(RuleSpec::new(5.0).min_quantity(0.0), false)));
    }

    #[test]
    fn min_quantity_is_inclusive() {
        let r = record(RuleSpec::new(5.0).min_quantity(10.0), true);
        assert!(query(None, 10.0).matches(&r));
        assert!(!query(None, 9.99).matches(&r));
    }

    #[test]
    fn typed_rule_requires_same_client_type() {
        let retail = ClientTypeId::new();
        let r = record(RuleSpec::new(5.0).for_client_type(retail), true);

        assert!(query(Some(retail), 1.0).matches(&r));
        assert!(!query(Some(ClientTypeId::new()), 1.0).matches(&r));
        assert!(!query(None, 1.0).matches(&r));
    }

    #[test]
    fn product_and_category_axes_match_context() {
        let q = query(None, 1.0);
        assert!(q.matches(&record(RuleSpec::new(1.0).for_product(q.product), true)));
        assert!(!q.matches(&record(RuleSpec::new(1.0).for_product(ProductId::new()), true)));
        assert!(q.matches(&record(RuleSpec::new(1.0).for_category(q.category), true)));
        assert!(!q.matches(&record(RuleSpec::new(1.0).for_category(CategoryId::new()), true)));
    }

    #[test]
    fn save_rejects_policy_that_was_never_created() {
        let repo = InMemoryRuleRepository::new();
        let err = repo.save(DiscountPolicy::empty(PolicyId::new())).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert!(repo.list().is_empty());
    }
}
