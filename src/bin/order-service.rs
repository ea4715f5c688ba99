use clap::Parser;

use service_scaffold::lifecycle::{self, ServiceArgs};
use service_scaffold::ServiceProfile;

#[derive(Parser)]
#[command(name = "order-service")]
#[command(about = "Order service skeleton", long_about = None)]
struct Cli {
    #[command(flatten)]
    args: ServiceArgs,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    lifecycle::run(Some(ServiceProfile::Order), cli.args).await?;
    Ok(())
}
