//! Seed or refresh the product catalog.
//!
//! Upserts by name: existing products get their category and default
//! price refreshed, everything else is inserted. Safe to re-run.

use anyhow::Context;
use shared::models::{ProductCreate, ProductUpdate, CATEGORY_ACTIVITIES_GROUP, CATEGORY_VOUCHER};
use venue_server::core::Config;
use venue_server::db::repository::product as product_repo;
use venue_server::db::DbService;
use venue_server::utils::logger::init_logger_with_file;

/// (name, category, default_price)
const CATALOG: &[(&str, &str, f64)] = &[
    ("1 Day Pass (Group)", CATEGORY_VOUCHER, 750.0),
    ("2 Day Pass (Group)", CATEGORY_VOUCHER, 1300.0),
    ("3 Day Pass (Group)", CATEGORY_VOUCHER, 1800.0),
    ("1 Day Pass (PV)", CATEGORY_VOUCHER, 1390.0),
    ("2 Day Pass (PV)", CATEGORY_VOUCHER, 2500.0),
    ("3 Day Pass (PV)", CATEGORY_VOUCHER, 3450.0),
    ("Activities Group (On-site, 10p)", CATEGORY_ACTIVITIES_GROUP, 900.0),
    ("Activities Group (On-site, 15p)", CATEGORY_ACTIVITIES_GROUP, 850.0),
    ("Activities Group (On-site, 20p)", CATEGORY_ACTIVITIES_GROUP, 800.0),
    ("Activities Group (On-site, 30p)", CATEGORY_ACTIVITIES_GROUP, 750.0),
    ("Activities Group (On-site, 40p)", CATEGORY_ACTIVITIES_GROUP, 700.0),
    ("Activities Group (On-site, 50p)", CATEGORY_ACTIVITIES_GROUP, 650.0),
    ("Activities Group (Off-site, 20p)", CATEGORY_ACTIVITIES_GROUP, 1300.0),
    ("Activities Group (Off-site, 40p)", CATEGORY_ACTIVITIES_GROUP, 1100.0),
    ("Activities Group (Off-site, 60p)", CATEGORY_ACTIVITIES_GROUP, 1000.0),
    ("Activities Group (Off-site, 80p)", CATEGORY_ACTIVITIES_GROUP, 950.0),
    ("Activities Group (Off-site, 100p)", CATEGORY_ACTIVITIES_GROUP, 850.0),
    ("B2BC Base", "b2bc", 0.0),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    let db = DbService::new(&config.database_path)
        .await
        .context("failed to open database")?;

    for &(name, category, default_price) in CATALOG {
        match product_repo::find_by_name(&db.pool, name).await? {
            Some(existing) => {
                product_repo::update(
                    &db.pool,
                    existing.id,
                    ProductUpdate {
                        name: None,
                        category: Some(category.into()),
                        default_price: Some(default_price),
                        description: None,
                    },
                )
                .await?;
            }
            None => {
                product_repo::create(
                    &db.pool,
                    ProductCreate {
                        name: name.into(),
                        category: category.into(),
                        default_price,
                        description: None,
                    },
                )
                .await?;
            }
        }
    }

    println!("Products seeded successfully.");
    Ok(())
}
