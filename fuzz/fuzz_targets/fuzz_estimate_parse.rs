#![no_main]

use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Errors are fine, panics are bugs.
        if let Ok(estimate) = devis::estimation::Estimate::from_json_str(s) {
            let catalog = [devis::estimation::CatalogMaterial {
                id: "fuzz".into(),
                name: "Ciment Portland".into(),
                category: "Liants".into(),
                unit_price: Decimal::new(8, 1),
                unit: "kg".into(),
            }];
            let enriched = devis::estimation::enrich_estimate(estimate, &catalog);
            let _ = devis::estimation::estimate_lines(&enriched, Decimal::from(20));
        }
    }
});
