use clap::Args;
use coupons_app::domain::coupons::{PgCouponsRepository, seed::seed_coupons};
use jiff::Timestamp;

use super::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct SeedArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: SeedArgs) -> Result<(), String> {
    let repository = PgCouponsRepository::new(args.database.connect().await?);

    let inserted = seed_coupons(&repository, Timestamp::now())
        .await
        .map_err(|error| format!("failed to seed coupons: {error}"))?;

    if inserted == 0 {
        println!("coupons already present; nothing seeded");
    } else {
        println!("seeded {inserted} coupons");
    }

    Ok(())
}
