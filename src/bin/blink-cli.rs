use clap::{Parser, Subcommand};
use serde_json::Value;

use tip_blink::action::ActionPostRequest;

#[derive(Parser)]
#[command(name = "blink-cli")]
#[command(about = "Exercise a tip action endpoint from the command line", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000/api/action")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the action metadata
    Metadata,
    /// Request an unsigned tip transaction for an account
    Tip {
        /// Sender public key (base58)
        #[arg(short, long)]
        account: String,
        /// Recipient public key (base58)
        #[arg(short, long)]
        to: Option<String>,
        /// Amount in SOL
        #[arg(long)]
        amount: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Metadata => {
            let res = client.get(&cli.url).send().await?;
            print_response(res).await?;
        }
        Commands::Tip { account, to, amount } => {
            let mut query = Vec::new();
            if let Some(to) = to {
                query.push(("to", to));
            }
            if let Some(amount) = amount {
                query.push(("amount", amount.to_string()));
            }
            let res = client
                .post(&cli.url)
                .query(&query)
                .json(&ActionPostRequest { account })
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    // Errors come back as plain text, sometimes with status 200.
    match serde_json::from_str::<Value>(&text) {
        Ok(json) if status.is_success() => println!("{}", serde_json::to_string_pretty(&json)?),
        _ => eprintln!("Error ({}): {}", status, text),
    }
    Ok(())
}
