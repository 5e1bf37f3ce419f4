use clap::Args;
use coupons_app::domain::coupons::CouponsService;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ListCouponsArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ListCouponsArgs) -> Result<(), String> {
    let service = super::service(&args.database).await?;

    let coupons = service
        .list_coupons()
        .await
        .map_err(|error| format!("failed to list coupons: {error}"))?;

    if coupons.is_empty() {
        println!("no coupons found");
        return Ok(());
    }

    for coupon in coupons {
        println!("coupon_uuid: {}", coupon.uuid());
        println!("code: {}", coupon.code());
        println!(
            "discount: {} {}",
            coupon.discount_value(),
            coupon.discount_type()
        );
        println!(
            "minimum_order_value: {}",
            coupon
                .minimum_order_value()
                .map_or_else(|| "none".to_string(), |value| value.to_string())
        );
        println!(
            "expires_at: {}",
            coupon
                .expires_at()
                .map_or_else(|| "never".to_string(), |value| value.to_string())
        );
        println!("active: {}", coupon.is_active());
        println!("unique_per_customer: {}", coupon.is_unique_per_customer());
        println!("usage_count: {}", coupon.usage_count());
        println!();
    }

    Ok(())
}
