//! Service scaffold
//!
//! Runs either the order service or the payment service.
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request-id filter ─▶ TraceLayer ─▶ timeout ─▶ /api/v1/ping
//!                     (server span,                                 (sleep, JSON with
//!                      log context)                                  request/trace/span ids)
//!     ◀────────────── X-Request-Id echoed
//!
//!     RandomLogGenerator ── every N seconds ──▶ root span + fresh request id ─▶ one log line
//! ```

use clap::Parser;

use service_scaffold::lifecycle::{self, ServiceArgs};
use service_scaffold::ServiceProfile;

#[derive(Parser)]
#[command(name = "service-scaffold")]
#[command(about = "Order/payment service skeleton with request-id and trace correlation", long_about = None)]
struct Cli {
    /// Which service to run. Defaults to the config file's profile, then order.
    #[arg(short, long, value_enum, env = "SERVICE_PROFILE")]
    service: Option<ServiceProfile>,

    #[command(flatten)]
    args: ServiceArgs,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    lifecycle::run(cli.service, cli.args).await?;
    Ok(())
}
