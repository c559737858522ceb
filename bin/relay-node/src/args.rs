//! Parses command-line arguments for the relay node.

use std::path::PathBuf;

use clap::{crate_version, Parser};

#[derive(Debug, Parser)]
#[clap(
    name = "relay-node",
    about = "A node that serves relays for staked applications",
    version = crate_version!()
)]
pub(crate) struct Cli {
    #[clap(
        long,
        short = 'p',
        help = "The file containing the network params",
        default_value = "params.toml"
    )]
    pub params: PathBuf,

    #[clap(
        long,
        short = 'c',
        help = "The file containing the configuration for the node",
        default_value = "config.toml"
    )]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let cli = Cli::parse_from(["relay-node"]);

        assert_eq!(cli.params, PathBuf::from("params.toml"));
        assert_eq!(cli.config, PathBuf::from("config.toml"));

        let cli = Cli::parse_from(["relay-node", "-p", "a.toml", "--config", "b.toml"]);
        assert_eq!(cli.params, PathBuf::from("a.toml"));
        assert_eq!(cli.config, PathBuf::from("b.toml"));
    }
}
