use std::io;
use syno_iscsi::cli::Cli;
use syno_iscsi::client::DsmClient;
use syno_iscsi::commands::{self, Context, Request};
use syno_iscsi::display;
use syno_iscsi::error::Result;
use syno_iscsi::logger;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Cli::parse_args();

    // Initialize logging system
    if let Err(e) = logger::init(args.verbose) {
        eprintln!("Warning: {}", e);
    }

    debug!("syno-iscsi starting");

    if let Err(e) = run(args).await {
        debug!("Operation failed: {:?}", e);
        display::display_error(&e);
        std::process::exit(1);
    }
}

async fn run(args: Cli) -> Result<()> {
    // Validate before asking for a password or touching the network
    let request = Request::from_command(args.command)?;
    let config = args.connection.resolve()?;

    let client = DsmClient::new(&config)?;
    let stdin = io::stdin();
    let mut ctx = Context::new(client, stdin.lock(), io::stdout());

    commands::execute(&mut ctx, request).await
}
