use clap::{Parser, Subcommand};

/// Sailwatch CLI.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// The subcommands supported by the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Serve the API.
    Serve {
        /// The address to bind to.
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// The port to bind to.
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },

    /// Collect the instance inventory once and print it.
    Instances {
        /// Print JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the X-Hub-Signature-256 value for a webhook payload.
    Sign {
        /// Payload file, or "-" for stdin.
        #[arg(default_value = "-")]
        payload: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::parse_from(["sailwatch", "serve"]);
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host, "0.0.0.0");
                assert_eq!(port, 3000);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_instances_and_sign() {
        let cli = Cli::parse_from(["sailwatch", "instances", "--json"]);
        assert!(matches!(cli.command, Commands::Instances { json: true }));

        let cli = Cli::parse_from(["sailwatch", "sign", "payload.json"]);
        match cli.command {
            Commands::Sign { payload } => assert_eq!(payload, "payload.json"),
            _ => panic!("expected sign"),
        }
    }
}
