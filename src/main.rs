// src/main.rs

use statwatch::{cli, logging, run};

#[tokio::main]
async fn main() {
    let (args, targets) = cli::parse();

    if let Err(err) = logging::init_logging(args.verbose) {
        eprintln!("statwatch error: {err:?}");
        std::process::exit(1);
    }

    match run(args, targets).await {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(err) => {
            eprintln!("statwatch error: {err}");
            std::process::exit(1);
        }
    }
}
