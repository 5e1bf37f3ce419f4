use clap::Args;
use coupons_app::domain::coupons::{
    CouponsService,
    models::{DiscountType, NewCoupon},
};
use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateCouponArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Coupon code; stored trimmed and uppercased
    #[arg(long)]
    code: String,

    /// `fixed` or `percentage`
    #[arg(long)]
    discount_type: DiscountType,

    /// Discount amount, or percentage points for percentage coupons
    #[arg(long)]
    discount_value: Decimal,

    #[arg(long)]
    minimum_order_value: Option<Decimal>,

    /// RFC 3339 instant after which the coupon is rejected
    #[arg(long)]
    expires_at: Option<Timestamp>,

    /// Allow each customer to redeem the coupon only once
    #[arg(long)]
    unique_per_customer: bool,
}

pub(crate) async fn run(args: CreateCouponArgs) -> Result<(), String> {
    let service = super::service(&args.database).await?;

    let coupon = service
        .create_coupon(NewCoupon {
            code: args.code,
            discount_type: args.discount_type,
            discount_value: args.discount_value,
            minimum_order_value: args.minimum_order_value,
            expires_at: args.expires_at,
            is_unique_per_customer: args.unique_per_customer,
        })
        .await
        .map_err(|error| format!("failed to create coupon: {error}"))?;

    println!("coupon_uuid: {}", coupon.uuid());
    println!("code: {}", coupon.code());

    Ok(())
}
