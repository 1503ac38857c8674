use std::process;

mod cli;
mod exit_codes;

use clap::CommandFactory;
use cli::{Cli, Commands};
use exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    // Fast path for help - avoid any initialization
    if cli.command.is_none() {
        Cli::command().print_help().expect("Failed to print help");
        process::exit(EXIT_SUCCESS);
    }

    use tracing::Level;

    // Configure logging based on verbosity flags and MCP mode detection.
    // In MCP mode stdout belongs to the protocol, so logs must never go
    // there.
    use is_terminal::IsTerminal;
    let is_mcp_mode =
        matches!(cli.command, Some(Commands::Serve)) && !std::io::stdin().is_terminal();

    let log_level = if is_mcp_mode {
        Level::DEBUG // More verbose for MCP mode to help with debugging
    } else if cli.quiet {
        Level::ERROR
    } else if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::TRACE
    } else {
        Level::INFO
    };

    if is_mcp_mode {
        // In MCP mode, write logs to ~/.backlog-mcp for debugging
        use std::fs;
        use std::path::PathBuf;

        let log_dir = if let Some(home) = dirs::home_dir() {
            home.join(".backlog-mcp")
        } else {
            PathBuf::from(".backlog-mcp")
        };

        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("Failed to create log directory: {e}");
        }

        let log_filename =
            std::env::var("BACKLOG_MCP_LOG_FILE").unwrap_or_else(|_| "mcp.log".to_string());
        let log_file = log_dir.join(log_filename);

        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
        {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .with_writer(file)
                    .with_max_level(log_level)
                    .with_ansi(false) // No color codes in file
                    .init();
            }
            Err(e) => {
                // Fallback to stderr if file logging fails
                eprintln!("Failed to open log file, using stderr: {e}");
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_max_level(log_level)
                    .init();
            }
        }
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(log_level)
            .init();
    }

    let exit_code = match cli.command {
        Some(Commands::Serve) => {
            tracing::info!("Starting MCP server");
            run_server().await
        }
        Some(Commands::Doctor) => {
            tracing::info!("Running diagnostics");
            run_doctor().await
        }
        None => {
            // This case is handled early above for performance
            unreachable!()
        }
    };

    process::exit(exit_code);
}

async fn run_server() -> i32 {
    use backlog_mcp::{BacklogClient, Config, McpServer};
    use rmcp::serve_server;
    use rmcp::transport::io::stdio;
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    let config = Config::from_env();
    let client = BacklogClient::new(&config);
    let server = McpServer::new(Arc::new(client));

    // Set up cancellation token and signal handler
    let ct = CancellationToken::new();
    let ct_clone = ct.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl+c");

        tracing::info!("Shutdown signal received");
        ct_clone.cancel();
    });

    // Start the rmcp SDK server with stdio transport
    match serve_server(server, stdio()).await {
        Ok(running) => {
            tracing::info!("MCP server started successfully");

            tokio::select! {
                _ = ct.cancelled() => {
                    tracing::info!("MCP server shut down");
                }
                result = running.waiting() => {
                    if let Err(e) = result {
                        tracing::error!("MCP server error: {}", e);
                        return EXIT_WARNING;
                    }
                    tracing::info!("MCP server exited successfully");
                }
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            tracing::error!("MCP server error: {}", e);
            EXIT_WARNING
        }
    }
}

async fn run_doctor() -> i32 {
    use backlog_mcp::backend::BacklogApi;
    use backlog_mcp::{config, BacklogClient, Config};

    println!("backlog-mcp doctor");
    println!();

    let mut missing = false;
    for var in [config::SPACE_ID_VAR, config::API_KEY_VAR] {
        match std::env::var(var) {
            Ok(value) if !value.is_empty() => println!("  ok       {var} is set"),
            _ => {
                println!("  missing  {var} is not set");
                missing = true;
            }
        }
    }

    if missing {
        println!();
        println!("Set the missing variables and re-run.");
        return EXIT_ERROR;
    }

    let config = Config::from_env();
    println!("  ok       API base is {}", config.base_url());

    let client = BacklogClient::new(&config);
    match client.list_projects().await {
        Ok(projects) => {
            println!("  ok       tracker answered with {} project(s)", projects.len());
            EXIT_SUCCESS
        }
        Err(e) => {
            println!("  failed   tracker did not answer: {e}");
            EXIT_WARNING
        }
    }
}
