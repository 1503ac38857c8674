use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "backlog-mcp")]
#[command(version)]
#[command(about = "An MCP server exposing a Backlog space as tools, resources and prompts")]
#[command(long_about = "
backlog-mcp is an MCP (Model Context Protocol) server that wraps a
Backlog-style issue tracker. It translates protocol requests into REST
calls against the tracker and enriches every response with callable
next-action links.

Configuration comes from the environment:
  BACKLOG_SPACE_ID   space identifier (API host subdomain)
  BACKLOG_API_KEY    API key, sent as a query credential
  BACKLOG_DOMAIN     tracker domain (optional, default backlog.jp)

Example usage:
  backlog-mcp serve     # Run as MCP server over stdio
  backlog-mcp doctor    # Check configuration and connectivity
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run as MCP server (default when invoked via stdio)
    #[command(long_about = "
Runs backlog-mcp as an MCP server over stdio. This is the mode an MCP
host (e.g. Claude Code) invokes. The server will:

- Expose the project and issue tools with their input schemas
- Serve backlog:/// resources for read-only browsing
- Serve the project_overview and bug_triage prompts

Example:
  backlog-mcp serve
  # Or configure in your MCP host's settings
")]
    Serve,
    /// Diagnose configuration and connectivity issues
    #[command(long_about = "
Checks that the required environment variables are present and that the
tracker answers an authenticated request.

Exit codes:
  0 - All checks passed
  1 - Warnings found
  2 - Errors found

Example:
  backlog-mcp doctor
")]
    Doctor,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_serve_command() {
        let cli = Cli::try_parse_from(["backlog-mcp", "serve"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve)));
        assert!(!cli.quiet);
    }

    #[test]
    fn test_parses_flags() {
        let cli = Cli::try_parse_from(["backlog-mcp", "--quiet", "doctor"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(cli.command, Some(Commands::Doctor)));
    }
}
