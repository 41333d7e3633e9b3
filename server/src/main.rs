use clap::Parser;
use server::network::RelayServer;

/// Main-method of the application.
/// Parses command-line arguments, binds the relay and runs it until Ctrl+C.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Command line arguments
    #[derive(Parser, Debug)]
    #[clap(author, version, about)]
    struct Args {
        /// Server IP address to bind to
        #[clap(short = 'H', long, default_value = "0.0.0.0")]
        host: String,
        /// Server port to listen on
        #[clap(short, long, env = "PORT", default_value_t = shared::DEFAULT_PORT)]
        port: u16,
    }

    // Parse command line arguments
    let args = Args::parse();

    env_logger::init();

    // Bind failures are startup failures; report and exit nonzero.
    let address = format!("{}:{}", args.host, args.port);
    let server = RelayServer::bind(&address).await?;

    let server_handle = tokio::spawn(server.run());

    // Handle shutdown gracefully; exiting closes every open connection.
    tokio::select! {
        result = server_handle => {
            if let Err(e) = result {
                eprintln!("Relay task panicked: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    Ok(())
}
