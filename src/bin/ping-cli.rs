use clap::Parser;
use reqwest::header::HeaderValue;
use serde_json::Value;

use service_scaffold::http::{PING_PATH, X_REQUEST_ID};

#[derive(Parser)]
#[command(name = "ping-cli")]
#[command(about = "Call a running service's ping endpoint", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Request id to send; the service generates one when omitted.
    #[arg(short, long)]
    request_id: Option<String>,

    /// W3C traceparent to continue, e.g. 00-<trace id>-<span id>-01.
    #[arg(short, long)]
    traceparent: Option<String>,

    /// Number of requests to send.
    #[arg(short = 'n', long, default_value_t = 1)]
    count: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let url = format!("{}{}", cli.url.trim_end_matches('/'), PING_PATH);

    for _ in 0..cli.count {
        let mut request = client.get(&url);
        if let Some(id) = &cli.request_id {
            request = request.header(X_REQUEST_ID, HeaderValue::from_str(id)?);
        }
        if let Some(traceparent) = &cli.traceparent {
            request = request.header("traceparent", HeaderValue::from_str(traceparent)?);
        }

        let res = request.send().await?;
        print_response(res).await?;
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let echoed = res
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    if let Some(id) = echoed {
        println!("{}: {}", X_REQUEST_ID, id);
    }
    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
