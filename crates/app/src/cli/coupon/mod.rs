use clap::{Args, Subcommand};

mod resolve;

#[derive(Debug, Args)]
pub(crate) struct CouponCommand {
    #[command(subcommand)]
    command: CouponSubcommand,
}

#[derive(Debug, Subcommand)]
enum CouponSubcommand {
    /// Print the merchant coupon that applies to a purchase
    Resolve(resolve::ResolveArgs),
}

pub(crate) async fn run(command: CouponCommand) -> Result<(), String> {
    match command.command {
        CouponSubcommand::Resolve(args) => resolve::run(args).await,
    }
}
