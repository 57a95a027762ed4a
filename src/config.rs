use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::replacement::ReplacementSet;

/// Validated parameters of one run. Built once, then only borrowed.
#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub api_key: String,
    pub uid: String,
    pub replacements: ReplacementSet,
    pub overwrite: bool,
    pub retries: u32,
    pub dry_run: bool,
}

impl Config {
    /// Validate parsed arguments. Runs before any network call.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let url = required(cli.url.as_deref(), "url")?;
        let api_key = required(cli.apikey.as_deref(), "apikey")?;
        let uid = required(cli.uid.as_deref(), "uid")?;

        let replacements = ReplacementSet::parse(&cli.replace)?;
        if replacements.is_empty() {
            return Err(Error::Config("'replace' is required".to_string()));
        }

        Ok(Self {
            url,
            api_key,
            uid,
            replacements,
            overwrite: cli.overwrite,
            retries: cli.retries,
            dry_run: cli.dry_run,
        })
    }

    /// Connection settings for the API client.
    pub fn client_config(&self) -> grafana::ClientConfig {
        grafana::ClientConfig {
            url: self.url.clone(),
            api_key: self.api_key.clone(),
            retries: self.retries,
        }
    }
}

fn required(value: Option<&str>, name: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(Error::Config(format!("'{name}' is required"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli() -> Cli {
        Cli {
            url: Some("https://grafana.example.com".to_string()),
            apikey: Some("key".to_string()),
            uid: Some("abc".to_string()),
            replace: vec!["old<=>new".to_string()],
            overwrite: true,
            retries: 3,
            dry_run: false,
            verbose: 0,
            quiet: false,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = Config::from_cli(&cli()).unwrap();
        assert_eq!(config.uid, "abc");
        assert_eq!(config.replacements.len(), 1);
        assert!(config.overwrite);

        let client = config.client_config();
        assert_eq!(client.url, "https://grafana.example.com");
        assert_eq!(client.api_key, "key");
        assert_eq!(client.retries, 3);
    }

    #[test]
    fn test_missing_url() {
        let mut args = cli();
        args.url = None;
        match Config::from_cli(&args) {
            Err(Error::Config(msg)) => assert_eq!(msg, "'url' is required"),
            other => panic!("Expected Error::Config, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_apikey() {
        let mut args = cli();
        args.apikey = Some("  ".to_string());
        assert!(matches!(
            Config::from_cli(&args),
            Err(Error::Config(ref msg)) if msg.contains("apikey")
        ));
    }

    #[test]
    fn test_values_are_kept_verbatim() {
        let mut args = cli();
        args.uid = Some(" abc ".to_string());
        args.apikey = Some("key ".to_string());
        let config = Config::from_cli(&args).unwrap();
        assert_eq!(config.uid, " abc ");
        assert_eq!(config.api_key, "key ");
    }

    #[test]
    fn test_missing_uid() {
        let mut args = cli();
        args.uid = None;
        assert!(matches!(
            Config::from_cli(&args),
            Err(Error::Config(ref msg)) if msg.contains("uid")
        ));
    }

    #[test]
    fn test_missing_replace() {
        let mut args = cli();
        args.replace.clear();
        assert!(matches!(
            Config::from_cli(&args),
            Err(Error::Config(ref msg)) if msg.contains("replace")
        ));
    }

    #[test]
    fn test_malformed_replace() {
        let mut args = cli();
        args.replace.push("no-separator".to_string());
        assert!(matches!(
            Config::from_cli(&args),
            Err(Error::MalformedReplacement { .. })
        ));
    }
}
