//! # Seed Data Generator
//!
//! Populates the database with a small demo catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./brewcalc_dev.db for owner "demo"
//! cargo run -p brewcalc-db --bin seed
//!
//! # Specify database path and inventory owner
//! cargo run -p brewcalc-db --bin seed -- --db ./data/brewcalc.db --owner alice
//! ```
//!
//! ## Generated Catalog
//! - Two suppliers, each with a flat freight charge
//! - A base liquid carrying the 8.345 lb/gal default density
//! - One flavor ("Lime Seltzer") with four recipe lines
//! - Tiered prices, one price override, stock counts for the owner
//! - 12oz and 16oz cans; a 500 gal batch filling 16oz cans
//! - Packaging and tolling costs

use rust_decimal::Decimal;
use std::env;

use brewcalc_core::{
    BatchCostsConfig, CanSize, Flavor, FreightCost, Ingredient, InventoryLevel, Money, PricingTier,
    RecipeLine, Supplier, BASE_LIQUID_DENSITY,
};
use brewcalc_db::{Database, DbConfig};

const FLAVOR_ID: &str = "flv-lime-seltzer";

/// (id, name)
const SUPPLIERS: &[(&str, &str)] = &[
    ("sup-acme", "Acme Chemical"),
    ("sup-coastal", "Coastal Flavor Co"),
];

/// Freight per supplier, in cents.
const FREIGHT_CENTS: &[(&str, i64)] = &[("sup-acme", 7500), ("sup-coastal", 12000)];

struct DemoIngredient {
    id: &'static str,
    name: &'static str,
    supplier: usize,
    part_number: Option<&'static str>,
    /// Thousandths of a unit.
    moq_milli: i64,
    /// Thousandths of a lb/gal; `None` uses the ingredient default.
    density_milli: Option<i64>,
    /// Thousandths of a percent.
    percentage_milli: i64,
    /// Thousandths of a unit on hand.
    on_hand_milli: i64,
    /// (min quantity, price in cents)
    tiers: &'static [(i64, i64)],
}

const INGREDIENTS: &[DemoIngredient] = &[
    DemoIngredient {
        id: "ing-base",
        name: "Base Liquid",
        supplier: 0,
        part_number: Some("BL-1000"),
        moq_milli: 1_000_000,
        density_milli: None,
        percentage_milli: 90_000,
        on_hand_milli: 1_500_000,
        tiers: &[(0, 12)],
    },
    DemoIngredient {
        id: "ing-citric",
        name: "Citric Acid",
        supplier: 0,
        part_number: Some("CA-50"),
        moq_milli: 50_000,
        density_milli: Some(8_450),
        percentage_milli: 2_000,
        on_hand_milli: 10_000,
        tiers: &[(0, 275), (100, 250), (500, 225)],
    },
    DemoIngredient {
        id: "ing-sugar",
        name: "Cane Sugar",
        supplier: 0,
        part_number: None,
        moq_milli: 50_000,
        density_milli: Some(13_250),
        percentage_milli: 7_500,
        on_hand_milli: 125_000,
        tiers: &[(0, 95), (1000, 80)],
    },
    DemoIngredient {
        id: "ing-lime",
        name: "Natural Lime Flavor",
        supplier: 1,
        part_number: Some("NLF-22"),
        moq_milli: 5_000,
        density_milli: Some(8_600),
        percentage_milli: 500,
        on_hand_milli: 0,
        tiers: &[],
    },
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./brewcalc_dev.db");
    let mut owner = String::from("demo");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--owner" | "-o" => {
                if i + 1 < args.len() {
                    owner = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Brewcalc Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>       Database file path (default: ./brewcalc_dev.db)");
                println!("  -o, --owner <ID>      Inventory owner (default: demo)");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Brewcalc Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!("Owner:    {}", owner);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let catalog = db.catalog();
    if catalog.get_flavor(FLAVOR_ID).await?.is_some() {
        println!("⚠ Demo flavor already exists");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Catalog
    let suppliers: Vec<Supplier> = SUPPLIERS
        .iter()
        .map(|(id, name)| Supplier {
            id: id.to_string(),
            name: name.to_string(),
        })
        .collect();
    for supplier in &suppliers {
        catalog.insert_supplier(supplier).await?;
    }
    println!("✓ {} suppliers", suppliers.len());

    catalog
        .insert_flavor(&Flavor {
            id: FLAVOR_ID.to_string(),
            name: "Lime Seltzer".to_string(),
            base_batch_size_gallons: Decimal::from(500),
        })
        .await?;

    let mut tier_count = 0;
    let mut levels = Vec::with_capacity(INGREDIENTS.len());
    for demo in INGREDIENTS {
        let ingredient = Ingredient {
            id: demo.id.to_string(),
            name: demo.name.to_string(),
            unit: "lb".to_string(),
            moq: milli(demo.moq_milli),
            part_number: demo.part_number.map(str::to_string),
            supplier: suppliers[demo.supplier].clone(),
            // The base liquid is the only ingredient relying on a default
            default_density: demo.density_milli.is_none().then_some(BASE_LIQUID_DENSITY),
        };
        catalog.insert_ingredient(&ingredient).await?;

        catalog
            .upsert_recipe_line(&RecipeLine {
                flavor_id: FLAVOR_ID.to_string(),
                ingredient_id: demo.id.to_string(),
                percentage: milli(demo.percentage_milli),
                density: demo.density_milli.map(milli),
            })
            .await?;

        for (min_quantity, price_cents) in demo.tiers {
            catalog
                .insert_tier(&PricingTier {
                    ingredient_id: demo.id.to_string(),
                    min_quantity: Decimal::from(*min_quantity),
                    price_per_unit: cents(*price_cents),
                })
                .await?;
            tier_count += 1;
        }

        levels.push(InventoryLevel {
            ingredient_id: demo.id.to_string(),
            owner_id: owner.clone(),
            current_level: milli(demo.on_hand_milli),
        });
    }
    println!("✓ {} ingredients, {} pricing tiers", INGREDIENTS.len(), tier_count);

    // Lime flavor has no tiers; price it by override
    catalog
        .set_price_override("ing-lime", Some(cents(1850)))
        .await?;
    println!("✓ Price override on ing-lime");

    db.inventory().upsert_levels(&levels).await?;
    println!("✓ {} stock counts for {}", levels.len(), owner);

    // Settings
    for (id, oz) in [("can-12oz", 12), ("can-16oz", 16)] {
        catalog
            .insert_can_size(&CanSize {
                id: id.to_string(),
                name: format!("{}oz", oz),
                size_oz: Decimal::from(oz),
            })
            .await?;
    }

    let settings = db.settings();
    let size = settings
        .resize_batch(Decimal::from(500), Some("can-16oz"))
        .await?;
    println!(
        "✓ Batch size {} gal, {} cans",
        size.size_gallons, size.cans_per_batch
    );

    settings
        .save_batch_costs(&BatchCostsConfig {
            can_cost: cents(9),
            can_end_cost: cents(3),
            tray_cost: cents(2),
            paktech_cost: cents(1),
            storage_cost: cents(1),
            tolling_cost_per_gallon: cents(125),
        })
        .await?;
    println!("✓ Batch costs");

    for (supplier_id, freight_cents) in FREIGHT_CENTS {
        settings
            .upsert_freight_cost(&FreightCost {
                supplier_id: supplier_id.to_string(),
                cost: cents(*freight_cents),
            })
            .await?;
    }
    println!("✓ Freight for {} suppliers", FREIGHT_CENTS.len());

    // Verify
    println!();
    let input = db.load_snapshot(FLAVOR_ID, &owner).await?;
    let plan = brewcalc_core::calculate(&input);
    println!("Verifying snapshot...");
    println!("  Lines: {}", plan.lines.len());
    println!("  Batch total: {}", plan.summary.total_batch_cost);
    println!("  Per can: {}", plan.summary.cost_per_can);

    println!();
    println!("✓ Seed complete! Try:");
    println!(
        "  BREWCALC_FLAVOR_ID={} BREWCALC_OWNER_ID={} cargo run -p brewcalc-planner",
        FLAVOR_ID, owner
    );

    Ok(())
}

fn milli(value: i64) -> Decimal {
    Decimal::new(value, 3)
}

fn cents(value: i64) -> Money {
    Money::new(Decimal::new(value, 2))
}
