use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use multiledger_core::AccountId;
use multiledger_ledger::{AccountCategory, AccountRegistry, CommissionKind, Currency};

fn setup(accounts: usize) -> (AccountRegistry, Vec<AccountId>) {
    let registry = AccountRegistry::new();
    let ids: Vec<AccountId> = (0..accounts)
        .map(|n| AccountId::new(format!("ES{n:022}")).unwrap())
        .collect();
    for id in &ids {
        registry
            .create_account(id.clone(), "Bench Holder", AccountCategory::Current)
            .unwrap();
        registry.activate(id).unwrap();
        registry
            .deposit(id, 1_000_000_000, Currency::Eur, "Seed")
            .unwrap();
    }
    (registry, ids)
}

fn bench_deposit(c: &mut Criterion) {
    let (registry, ids) = setup(1);
    let mut group = c.benchmark_group("deposit");
    group.throughput(Throughput::Elements(1));
    group.bench_function("single_account", |b| {
        b.iter(|| {
            registry
                .deposit(black_box(&ids[0]), black_box(100), Currency::Eur, "bench")
                .unwrap()
        })
    });
    group.finish();
}

fn bench_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer");
    group.throughput(Throughput::Elements(1));
    for accounts in [2usize, 64] {
        let (registry, ids) = setup(accounts);
        group.bench_with_input(BenchmarkId::from_parameter(accounts), &accounts, |b, &n| {
            let mut i = 0usize;
            b.iter(|| {
                let from = &ids[i % n];
                let to = &ids[(i + 1) % n];
                i += 1;
                registry
                    .transfer(
                        black_box(from),
                        black_box(to),
                        black_box(10),
                        Currency::Eur,
                        "bench",
                        CommissionKind::None,
                    )
                    .unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_deposit, bench_transfer);
criterion_main!(benches);
