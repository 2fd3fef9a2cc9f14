//! dictbuddy - Main CLI Entry Point

use anyhow::Result;
use dictbuddy::{
    cli::{Args, Config},
    repl::{self, show_error, InputHandler, ReplSession},
    telemetry, translator_for,
};
use std::io;
use tracing::debug;

async fn run(args: Args) -> Result<()> {
    // Credential problems end the process before any input is read
    let config = Config::from_args(&args)?;
    let translator = translator_for(&config)?;
    debug!(mode = config.mode.as_str(), "translator ready");

    let mut out = io::stdout();

    match args.single_shot_query() {
        Some(query) => repl::run_once(translator.as_ref(), &query, &mut out).await?,
        None => {
            let mut input = InputHandler::new()?;
            let mut session = ReplSession::new(translator.as_ref());
            let end = session.run(&mut input, &mut out).await?;
            debug!(?end, lookups = session.lookup_count(), "session finished");
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::from_env();
    telemetry::init(args.verbose);

    if let Err(e) = run(args).await {
        show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
