use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(name = "grafana-string-replacer")]
#[command(version)]
#[command(
    about = "Replace strings in a Grafana dashboard and save it back",
    long_about = None
)]
pub struct Cli {
    /// Grafana url (required)
    #[arg(long, env = "GRAFANA_URL")]
    pub url: Option<String>,

    /// Grafana api key (required)
    #[arg(long, env = "GRAFANA_API_KEY", hide_env_values = true)]
    pub apikey: Option<String>,

    /// Dashboard uid to process (required)
    #[arg(long)]
    pub uid: Option<String>,

    /// What to replace (key<=>value, multiple entries allowed, required)
    #[arg(short, long, value_name = "KEY<=>VALUE")]
    pub replace: Vec<String>,

    /// Overwrite dashboard on conflict
    #[arg(long, default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    pub overwrite: bool,

    /// Retries for each call to the Grafana api
    #[arg(long, default_value_t = 3)]
    pub retries: u32,

    /// Show the changes without saving the dashboard
    #[arg(long)]
    pub dry_run: bool,

    /// Verbosity level
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["grafana-string-replacer", "--uid", "abc"]).unwrap();
        assert!(cli.overwrite);
        assert_eq!(cli.retries, 3);
        assert!(!cli.dry_run);
        assert!(cli.replace.is_empty());
    }

    #[test]
    fn test_repeated_replace_keeps_order() {
        let cli = Cli::try_parse_from([
            "grafana-string-replacer",
            "--replace",
            "b<=>c",
            "-r",
            "a<=>b",
        ])
        .unwrap();
        assert_eq!(cli.replace, vec!["b<=>c", "a<=>b"]);
    }

    #[test]
    fn test_overwrite_false() {
        let cli =
            Cli::try_parse_from(["grafana-string-replacer", "--overwrite", "false"]).unwrap();
        assert!(!cli.overwrite);
    }

    #[test]
    fn test_retries_must_be_a_number() {
        let result = Cli::try_parse_from(["grafana-string-replacer", "--retries", "many"]);
        assert!(result.is_err());
    }
}
