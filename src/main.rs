use clap::Parser;
use fitreader_rs::config::{Args, Config};
use fitreader_rs::converter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "fitreader_rs=debug,fitreader=debug"
    } else {
        "fitreader_rs=info,fitreader=info"
    };

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = converter::run(&config) {
        tracing::error!("Conversion failed: {}", e);
        std::process::exit(1);
    }
}
