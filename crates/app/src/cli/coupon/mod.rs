use std::sync::Arc;

use clap::{Args, Subcommand};
use coupons_app::domain::coupons::{DefaultCouponsService, PgCouponsRepository};

use super::DatabaseArgs;

mod create;
mod deactivate;
mod list;

#[derive(Debug, Args)]
pub(crate) struct CouponCommand {
    #[command(subcommand)]
    command: CouponSubcommand,
}

#[derive(Debug, Subcommand)]
enum CouponSubcommand {
    Create(create::CreateCouponArgs),
    List(list::ListCouponsArgs),
    Deactivate(deactivate::DeactivateCouponArgs),
}

pub(crate) async fn run(command: CouponCommand) -> Result<(), String> {
    match command.command {
        CouponSubcommand::Create(args) => create::run(args).await,
        CouponSubcommand::List(args) => list::run(args).await,
        CouponSubcommand::Deactivate(args) => deactivate::run(args).await,
    }
}

async fn service(database: &DatabaseArgs) -> Result<DefaultCouponsService, String> {
    let repository = PgCouponsRepository::new(database.connect().await?);

    Ok(DefaultCouponsService::new(Arc::new(repository)))
}
