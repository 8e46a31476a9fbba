use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use mackerel_inventory::{
    config::{Config, ConfigError},
    logging, Inventory, MackerelClient,
};
use tracing::error;

/// Ansible dynamic inventory for hosts registered in Mackerel
#[derive(Debug, Parser)]
#[command(name = "mackerel-inventory", version, about, long_about = None)]
struct Cli {
    /// List hosts
    #[arg(long)]
    list: bool,

    /// Get all the variables about a specific host
    #[arg(long, value_name = "HOST_NAME")]
    host: Option<String>,

    /// API key for mackerel.io
    #[arg(long, value_name = "API_KEY", env = "MACKEREL_API_KEY", hide_env_values = true)]
    mackerel_api_key: Option<String>,

    /// Base URL of the Mackerel API
    #[arg(long, value_name = "URL", env = "MACKEREL_APIBASE")]
    mackerel_api_base: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECS", env = "MACKEREL_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

#[derive(Debug, PartialEq, Eq)]
enum Query<'a> {
    List,
    Host(&'a str),
    Nothing,
}

impl Cli {
    /// `--list` wins over `--host`; an empty host name counts as absent.
    fn query(&self) -> Query<'_> {
        if self.list {
            return Query::List;
        }
        match self.host.as_deref() {
            Some(name) if !name.is_empty() => Query::Host(name),
            _ => Query::Nothing,
        }
    }

    fn config(&self) -> Result<Config, ConfigError> {
        Config::resolve(
            self.mackerel_api_key.clone(),
            self.mackerel_api_base.clone(),
            self.timeout_secs,
        )
    }
}

fn fatal_message(err: &ConfigError) -> String {
    format!("Error: {err}")
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging();

    let config = match cli.config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", fatal_message(&err));
            return ExitCode::FAILURE;
        }
    };

    let client = match MackerelClient::new(&config) {
        Ok(client) => client,
        Err(err) => {
            error!(error = %err, "failed to build mackerel client");
            return ExitCode::FAILURE;
        }
    };
    let mut inventory = Inventory::new(Arc::new(client));

    match cli.query() {
        Query::List => println!("{}", inventory.list().await),
        Query::Host(name) => println!("{}", inventory.host(name).await),
        Query::Nothing => {}
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["mackerel-inventory", "--mackerel-api-key", "abc"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("args should parse")
    }

    #[test]
    fn list_flag_selects_list() {
        assert_eq!(parse(&["--list"]).query(), Query::List);
    }

    #[test]
    fn list_wins_over_host() {
        assert_eq!(parse(&["--host", "app-01", "--list"]).query(), Query::List);
    }

    #[test]
    fn host_flag_selects_host() {
        assert_eq!(parse(&["--host", "app-01"]).query(), Query::Host("app-01"));
    }

    #[test]
    fn empty_host_does_nothing() {
        assert_eq!(parse(&["--host", ""]).query(), Query::Nothing);
        assert_eq!(parse(&[]).query(), Query::Nothing);
    }

    #[test]
    fn blank_api_key_is_fatal() {
        let cli = Cli::try_parse_from(["mackerel-inventory", "--list", "--mackerel-api-key", " "])
            .expect("args should parse");

        let err = cli.config().expect_err("expected missing key error");
        assert!(matches!(err, ConfigError::MissingApiKey));
        assert_eq!(fatal_message(&err), "Error: mackerel-api-key is required");
    }

    #[test]
    fn flags_reach_config() {
        let cli = parse(&["--mackerel-api-base", "http://127.0.0.1:9000/", "--timeout-secs", "7"]);

        let config = cli.config().expect("config should resolve");
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.api_base.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(config.timeout.as_secs(), 7);
    }
}
