use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::Utc;
use salesguard_discounts::{
    AddRule, CreatePolicy, DiscountPolicy, DiscountResolver, InMemoryRuleRepository, PolicyCommand, PolicyId,
    RuleId, RuleRepository, RuleSpec,
};
use salesguard_events::execute;
use salesguard_parties::{ClientTypeId, Customer, PartyId};
use salesguard_products::{CategoryId, Product, ProductId, ProductKind, TemplateId};
use std::sync::Arc;

struct Setup {
    resolver: DiscountResolver<Arc<InMemoryRuleRepository>>,
    customer: Customer,
    product: Product,
}

/// `rule_count` rules spread over 10 policies, mixing every axis shape.
fn setup(rule_count: usize) -> Setup {
    let client_types: Vec<ClientTypeId> = (0..4).map(|_| ClientTypeId::new()).collect();
    let categories: Vec<CategoryId> = (0..8).map(|_| CategoryId::new()).collect();
    let products: Vec<ProductId> = (0..32).map(|_| ProductId::new()).collect();

    let repo = Arc::new(InMemoryRuleRepository::new());
    let per_policy = rule_count.div_ceil(10).max(1);
    let mut added = 0usize;
    while added < rule_count {
        let policy_id = PolicyId::new();
        let mut policy = DiscountPolicy::empty(policy_id);
        execute(
            &mut policy,
            &PolicyCommand::CreatePolicy(CreatePolicy {
                policy_id,
                name: format!("policy-{added}"),
                active: true,
                occurred_at: Utc::now(),
            }),
        )
        .unwrap();

        for _ in 0..per_policy.min(rule_count - added) {
            let mut spec = RuleSpec::new((added % 50) as f64).min_quantity((added % 20) as f64);
            if added.is_multiple_of(2) {
                spec = spec.for_client_type(client_types[added % client_types.len()]);
            }
            if added.is_multiple_of(3) {
                spec = spec.for_product(products[added % products.len()]);
            }
            if added.is_multiple_of(5) {
                spec = spec.for_category(categories[added % categories.len()]);
            }
            execute(
                &mut policy,
                &PolicyCommand::AddRule(AddRule {
                    policy_id,
                    rule_id: RuleId::new(),
                    spec,
                    occurred_at: Utc::now(),
                }),
            )
            .unwrap();
            added += 1;
        }
        repo.save(policy).unwrap();
    }

    let customer = Customer::new(PartyId::new(), "Bench").unwrap().with_client_type(client_types[0]);
    let product = Product::new(products[0], TemplateId::new(), "Bench item", categories[0], ProductKind::Stockable).unwrap();
    Setup {
        resolver: DiscountResolver::new(repo),
        customer,
        product,
    }
}

fn bench_best_discount(c: &mut Criterion) {
    let mut group = c.benchmark_group("best_discount");
    group.throughput(Throughput::Elements(1));

    for rule_count in [100usize, 1_000, 10_000] {
        let s = setup(rule_count);
        group.bench_with_input(BenchmarkId::from_parameter(rule_count), &s, |b, s| {
            b.iter(|| {
                black_box(s.resolver.best_discount(
                    Some(black_box(&s.customer)),
                    Some(black_box(&s.product)),
                    black_box(12.0),
                ))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_best_discount);
criterion_main!(benches);
