use clap::Parser;
use networdle::GameClient;
use networdle_cli::{ClientArgs, init_tracing};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = ClientArgs::parse();
    init_tracing("warn");

    let mut client = GameClient::connect((args.host.as_str(), args.port)).await?;
    let stdin = BufReader::new(tokio::io::stdin());

    match client.play(stdin, tokio::io::stdout()).await {
        Ok(Some(guesses)) => {
            tracing::debug!(guesses, "game won");
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(e) => {
            // The player sees a short notice; the details go to the log.
            tracing::error!(error = %e, "game ended early");
            eprintln!("Connection to the server was lost.");
            std::process::exit(1);
        }
    }
}
