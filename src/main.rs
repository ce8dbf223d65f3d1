/// Entry point for the scoreboard binary
///
/// Thin wrapper; the application logic lives in `interfaces::cli`.

use live_scoreboard::interfaces::cli;

#[tokio::main]
async fn main() {
    if let Err(err) = cli::run().await {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
