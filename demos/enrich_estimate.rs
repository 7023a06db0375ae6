use devis::core::*;
use devis::estimation::*;
use rust_decimal_macros::dec;
use serde_json::json;

fn main() {
    // Catalog as stored by the application
    let catalog = json!([
        { "id": "mat-001", "name": "Ciment Portland CEM II", "category": "Liants", "unitPrice": 9.8, "unit": "sac" },
        { "id": "mat-002", "name": "Sable 0/4", "category": "Granulats", "unitPrice": "42,50", "unit": "t" },
        { "id": "mat-003", "name": "Treillis soudé ST25", "category": "Acier", "unitPrice": 38, "unit": "u" },
        { "id": "mat-004", "name": "Planche de coffrage", "category": "Bois", "unitPrice": 6.2, "unit": "ml" }
    ]);

    // Raw estimator response for a concrete slab
    let estimate = json!({
        "materiaux": [
            { "nom": "Ciment Portland", "quantite": 12, "unite": "sac", "prixUnitaire": 11, "prixTotal": 132 },
            { "nom": "sable 0/4", "quantite": "2,5", "unite": "T", "prixTotal": "95" },
            { "nom": "Treillis soudés ST25", "quantite": 6, "unite": "u", "prixTotal": 210 },
            { "nom": "Film polyane", "quantite": 1, "unite": "rouleau", "prixTotal": 45 }
        ],
        "tempsRealisation": "3 jours",
        "nombreOuvriers": 2,
        "detailsCouts": { "materiaux": 482, "mainOeuvre": 1050, "transport": 80 }
    });

    let enriched = match enrich_estimate_json(&estimate, &catalog) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Estimation rejetée: {e}");
            return;
        }
    };
    println!("{}", serde_json::to_string_pretty(&enriched).unwrap());

    // Same flow through the typed API, then into a quote
    let catalog = parse_catalog(&catalog).unwrap();
    let estimate = enrich_estimate(parse_estimate(&estimate).unwrap(), &catalog);

    println!("\n=== Correspondances ===");
    for material in &estimate.materials {
        match (&material.material_id, material.confidence) {
            (Some(id), Some(confidence)) => println!(
                "  {:<22} → {id} ({:.0}%) {} €",
                material.name,
                confidence * 100.0,
                material.total_price.unwrap_or_default()
            ),
            _ => println!("  {:<22} → à ajouter au catalogue", material.name),
        }
    }
    println!("Total matériaux: {} €", materials_total(&estimate).unwrap_or_default());

    let quote = QuoteBuilder::new("DEV-2024-077", chrono::NaiveDate::from_ymd_opt(2024, 4, 2).unwrap())
        .lines(estimate_lines(&estimate, dec!(20)))
        .build()
        .expect("quote should be valid");
    let totals = quote.totals.as_ref().unwrap();
    println!("\nDevis {}: {} HT, {} TTC", quote.number, totals.base.total_ht, totals.base.total_ttc);
}
