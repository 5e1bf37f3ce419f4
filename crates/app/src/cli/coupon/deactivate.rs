use clap::Args;
use coupons_app::domain::coupons::{CouponsService, models::normalize_code};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct DeactivateCouponArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    #[arg(long)]
    code: String,
}

pub(crate) async fn run(args: DeactivateCouponArgs) -> Result<(), String> {
    let service = super::service(&args.database).await?;

    service
        .deactivate_coupon(&args.code)
        .await
        .map_err(|error| format!("failed to deactivate coupon: {error}"))?;

    println!("deactivated: {}", normalize_code(&args.code));

    Ok(())
}
