use clap::{Parser, ValueEnum};

const LONG_ABOUT: &str = "\
Find out where the team members are today.

    $ whereis

Filter by employee name (fuzzy match):

    $ whereis matt

Use '--from' and '--to' to query a date range. Dates may be written as
20181201, 2018-12-01, 2018/12/01, 'Dec 1, 2018' and similar, or as one of
'today', 'tomorrow' ('tmw') and 'yesterday' ('ytd'):

    $ whereis -f yesterday
    $ whereis matt -f 20181201 -t 20181203

Results show the first page, 20 rows per page. Use '--page' to pick a page
and '--size' to change the page size (a large size disables paging):

    $ whereis -s 1000

Use '--grep' to keep only rows matching a pattern (case-insensitive):

    $ whereis -f 20190107 -t 20190111 --grep mon";

#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "whereis")]
#[command(about = "Find out where the team members are")]
#[command(long_about = LONG_ABOUT)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("WHEREIS_GIT_HASH"), ")"))]
pub struct Cli {
    /// Employee name to look for
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,

    /// Start of the date range
    #[arg(short, long, default_value = "today")]
    pub from: String,

    /// End of the date range (default: open-ended)
    #[arg(short, long, default_value = "")]
    pub to: String,

    /// Rows per page
    #[arg(short, long, default_value = "20")]
    pub size: String,

    /// Page to show
    #[arg(short, long, default_value = "1")]
    pub page: String,

    /// Work place to look in
    #[arg(short = 'P', long, default_value = "")]
    pub place: String,

    /// Keep only rows matching this pattern (case-insensitive)
    #[arg(long)]
    pub grep: Option<String>,

    /// Print the HTTP exchange. Overrides $SL_VERBOSE
    #[arg(short, long)]
    pub verbose: bool,

    /// Access token, may reference environment variables. Overrides $SL_TOKEN
    #[arg(long)]
    pub token: Option<String>,

    /// Offline mode; the command refuses to run. Overrides $SL_OFFLINE
    #[arg(short, long)]
    pub offline: bool,

    /// Log level. Overrides $SL_LOG_LEVEL
    #[arg(long)]
    pub log_level: Option<LogLevel>,

    /// Display log timestamps in UTC (default: local time)
    #[arg(long)]
    pub utc: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["whereis"]).unwrap();
        assert!(cli.names.is_empty());
        assert_eq!(cli.from, "today");
        assert_eq!(cli.to, "");
        assert_eq!(cli.size, "20");
        assert_eq!(cli.page, "1");
        assert_eq!(cli.place, "");
        assert_eq!(cli.grep, None);
        assert!(!cli.verbose && !cli.offline);
        assert_eq!(cli.token, None);
    }

    #[test]
    fn short_flags() {
        let cli = Cli::try_parse_from([
            "whereis", "matt", "-f", "ytd", "-t", "tmw", "-s", "5", "-p", "2", "-P", "Taipei", "-v", "-o",
        ])
        .unwrap();
        assert_eq!(cli.names, vec!["matt"]);
        assert_eq!(cli.from, "ytd");
        assert_eq!(cli.to, "tmw");
        assert_eq!(cli.size, "5");
        assert_eq!(cli.page, "2");
        assert_eq!(cli.place, "Taipei");
        assert!(cli.verbose && cli.offline);
    }

    #[test]
    fn extra_names_are_left_for_validation() {
        let cli = Cli::try_parse_from(["whereis", "matt", "ann"]).unwrap();
        assert_eq!(cli.names.len(), 2);
    }
}
