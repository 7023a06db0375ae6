use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use devis::core::*;
use devis::estimation::*;

const RATES: [Decimal; 4] = [dec!(20), dec!(10), dec!(5.5), dec!(0)];

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn build_lines(n: usize) -> Vec<Line> {
    (1..=n)
        .map(|i| {
            LineBuilder::new(i.to_string(), format!("Ouvrage {i}"), dec!(2.5), "m2", dec!(38.90))
                .vat_rate(RATES[i % RATES.len()])
                .build()
        })
        .collect()
}

fn build_catalog(n: usize) -> Vec<CatalogMaterial> {
    (1..=n)
        .map(|i| CatalogMaterial {
            id: format!("mat-{i:04}"),
            name: format!("Matériau de construction référence {i}"),
            category: "Divers".into(),
            unit_price: Decimal::new(i as i64 * 37, 2),
            unit: if i % 2 == 0 { "u".into() } else { "kg".into() },
        })
        .collect()
}

fn build_estimate(n: usize) -> Estimate {
    Estimate {
        materials: (1..=n)
            .map(|i| EstimationMaterial {
                name: format!("materiau de construction reference {}", i * 7),
                quantity: dec!(12),
                unit: "u".into(),
                total_price: Some(dec!(100)),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

fn bench_build_quote(c: &mut Criterion) {
    let lines = build_lines(10);
    c.bench_function("build_quote_10_lines", |b| {
        b.iter(|| {
            black_box(
                QuoteBuilder::new("DEV-BENCH", test_date())
                    .lines(lines.clone())
                    .discount(Discount::percentage(dec!(5)))
                    .build(),
            )
        });
    });
}

fn bench_quote_totals_1000(c: &mut Criterion) {
    let lines = build_lines(1000);
    let discount = Discount::fixed_amount(dec!(250));
    let deposit = Deposit::percentage(dec!(30), DepositBase::Ttc);
    c.bench_function("quote_totals_1000_lines", |b| {
        b.iter(|| {
            black_box(quote_totals(
                black_box(&lines),
                &discount,
                &deposit,
                dec!(60),
            ))
        });
    });
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_name", |b| {
        b.iter(|| black_box(normalize_name(black_box("Plaque de plâtre hydrofuge BA13 (vert)"))));
    });
}

fn bench_enrich_100_against_1000(c: &mut Criterion) {
    let catalog = build_catalog(1000);
    let estimate = build_estimate(100);
    c.bench_function("enrich_100_materials_1000_catalog", |b| {
        b.iter(|| black_box(enrich_estimate(black_box(estimate.clone()), &catalog)));
    });
}

criterion_group!(
    benches,
    bench_build_quote,
    bench_quote_totals_1000,
    bench_normalize,
    bench_enrich_100_against_1000,
);
criterion_main!(benches);
