use clap::Args;
use coupons::resolver::ActiveCouponQuery;
use coupons_app::context::AppContext;
use jiff::Timestamp;

#[derive(Debug, Args)]
pub(crate) struct ResolveArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Product being purchased
    #[arg(long)]
    product: String,

    /// Site coupon id supplied with the purchase
    #[arg(long, default_value = "")]
    coupon: String,

    /// Discount code entered by the customer
    #[arg(long, default_value = "")]
    code: String,

    /// Evaluate validity at this instant (RFC 3339); defaults to now
    #[arg(long)]
    at: Option<Timestamp>,
}

pub(crate) async fn run(args: ResolveArgs) -> Result<(), String> {
    if args.product.trim().is_empty() {
        return Err("product cannot be empty".to_string());
    }

    let context = AppContext::from_database_url(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let query = ActiveCouponQuery::from_raw(
        &args.product,
        &args.coupon,
        &args.code,
        args.at.unwrap_or_else(Timestamp::now),
    );

    let decision = context
        .coupons
        .get_active_merchant_coupon(&query)
        .await
        .map_err(|error| format!("failed to resolve coupon: {error}"))?;

    let json = serde_json::to_string_pretty(&decision)
        .map_err(|error| format!("failed to encode decision: {error}"))?;

    println!("{json}");

    Ok(())
}
