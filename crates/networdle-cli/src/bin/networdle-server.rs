use clap::Parser;
use networdle::prelude::*;
use networdle_cli::{ServerArgs, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = ServerArgs::parse();
    init_tracing("info");

    let config = args.server_config()?;
    let words = WordBank::load(&config.guess_list, &config.target_list)?;

    let mut builder = NetwordleServer::builder()
        .bind(&config.bind_address(args.port))
        .session_config(config.session_config())
        .word_bank(words);
    if let Some(seed) = config.seed {
        builder = builder.seed(seed);
    }

    let server = builder.build().await?;
    server.run().await?;
    Ok(())
}
