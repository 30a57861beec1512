//! `buildcheck` — verify a server project builds and is wired correctly,
//! without credentials or network access.

mod app;
mod cli;
mod config;
mod config_handlers;

use app::App;
use clap::Parser;
use cli::CliArgs;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    App::init_logging(args.verbose, args.quiet);

    let outcome = match App::from_args("buildcheck", &args) {
        Ok(app) => app.run(args).await,
        Err(err) => Err(err),
    };

    match outcome {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("💥 buildcheck could not run: {err}");
            std::process::exit(1);
        }
    }
}
