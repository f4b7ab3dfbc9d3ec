//! Command-line argument parsing.

use clap::Parser;

/// Trendsea - a terminal dashboard for real-time search trends
#[derive(Parser, Debug)]
#[command(name = "trendsea")]
#[command(version)]
#[command(about = "A terminal dashboard for real-time search trends", long_about = None)]
pub struct Args {
    /// Start on this country code (e.g. KR, US, JP) instead of the configured default
    #[arg(long)]
    pub country: Option<String>,

    /// Skip the network and serve a built-in placeholder feed
    #[arg(long)]
    pub offline: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_and_offline_parse() {
        let args = Args::parse_from(["trendsea", "--country", "jp", "--offline"]);
        assert_eq!(args.country.as_deref(), Some("jp"));
        assert!(args.offline);
        assert_eq!(args.log_level, "info");
    }
}
