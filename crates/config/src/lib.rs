use std::path::PathBuf;
use serde::Deserialize;

const TOOL_NAME: &str = "whereis";
const UNRELEASED: &str = "unreleased";

/// All configuration for the whereis command.
///
/// Precedence (lowest to highest): defaults → config file → env var → CLI arg.
/// CLI arg merging is done by the caller after `Config::load()`.
#[derive(Debug, Clone)]
pub struct Config {
    // API
    pub api_url: String,
    pub token: String,

    // Behaviour
    pub verbose: bool,
    pub offline: bool,

    // Identity of the invoking CLI, prefixed to the client-identification header
    pub cli_name: String,
    pub cli_version: String,

    // Logging
    pub log_level: String,
    pub utc: bool,
}

/// Config file layout (~/.slctl/whereis.toml). All fields are optional and
/// layer on top of the compiled-in defaults.
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    api_url: Option<String>,
    token: Option<String>,
    verbose: Option<bool>,
    offline: Option<bool>,
    cli_name: Option<String>,
    cli_version: Option<String>,
    log_level: Option<String>,
    utc: Option<bool>,
}

impl Config {
    /// Config directory: ~/.slctl/
    pub fn dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".slctl")
    }

    /// Config file path: ~/.slctl/whereis.toml
    pub fn file_path() -> PathBuf {
        Self::dir().join("whereis.toml")
    }

    /// Load config: defaults → config file → env vars.
    /// CLI args should be merged by the caller afterward.
    pub fn load() -> Self {
        let contents = std::fs::read_to_string(Self::file_path()).ok();
        Self::from_sources(contents.as_deref(), |key| std::env::var(key).ok())
    }

    /// Same layering as [`Config::load`] with the file contents and the
    /// environment supplied by the caller.
    pub fn from_sources(file: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::defaults();

        // Layer 2: config file
        if let Some(file) = file.and_then(|c| toml::from_str::<FileConfig>(c).ok()) {
            config.apply_file(file);
        }

        // Layer 3: environment variables
        config.apply_env(env);

        config
    }

    /// Value of the client-identification header:
    /// `<cli_name>/<cli_version> whereis/<version>`. The caller pair is left
    /// out when no caller name is configured.
    pub fn user_agent(&self) -> String {
        let own = format!("{TOOL_NAME}/{}", version());
        if self.cli_name.is_empty() {
            own
        } else {
            format!("{}/{} {own}", self.cli_name, self.cli_version)
        }
    }

    // --- Private helpers ---

    fn defaults() -> Self {
        Self {
            api_url: "http://support.softleader.com.tw/softleader-holiday".to_string(),
            token: String::new(),
            verbose: false,
            offline: false,
            cli_name: String::new(),
            cli_version: String::new(),
            log_level: "warn".to_string(),
            utc: false,
        }
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(v) = file.api_url { self.api_url = v; }
        if let Some(v) = file.token { self.token = v; }
        if let Some(v) = file.verbose { self.verbose = v; }
        if let Some(v) = file.offline { self.offline = v; }
        if let Some(v) = file.cli_name { self.cli_name = v; }
        if let Some(v) = file.cli_version { self.cli_version = v; }
        if let Some(v) = file.log_level { self.log_level = v; }
        if let Some(v) = file.utc { self.utc = v; }
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env("SL_API") { self.api_url = v; }
        if let Some(v) = env("SL_TOKEN") { self.token = v; }
        if let Some(v) = env("SL_VERBOSE").and_then(|v| parse_bool(&v)) { self.verbose = v; }
        if let Some(v) = env("SL_OFFLINE").and_then(|v| parse_bool(&v)) { self.offline = v; }
        if let Some(v) = env("SL_CLI") { self.cli_name = v; }
        if let Some(v) = env("SL_VERSION") { self.cli_version = v; }
        if let Some(v) = env("SL_LOG_LEVEL") { self.log_level = v; }
        if let Some(v) = env("SL_UTC").and_then(|v| parse_bool(&v)) { self.utc = v; }
    }
}

/// Version of this tool, or `unreleased` when none was stamped at build time.
pub fn version() -> &'static str {
    match env!("CARGO_PKG_VERSION").trim() {
        "" => UNRELEASED,
        v => v,
    }
}

/// Boolean spellings accepted in environment variables.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Expand `$VAR` and `${VAR}` references from the process environment.
/// Unset variables expand to the empty string.
pub fn expand_env(input: &str) -> String {
    expand_with(input, |key| std::env::var(key).ok())
}

/// [`expand_env`] against a caller supplied lookup.
pub fn expand_with(input: &str, env: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };
        if consumed == 0 {
            out.push('$');
        } else {
            out.push_str(&env(name).unwrap_or_default());
        }
        rest = &after[consumed..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_sources() {
        let config = Config::from_sources(None, env(&[]));
        assert_eq!(config.api_url, "http://support.softleader.com.tw/softleader-holiday");
        assert!(config.token.is_empty());
        assert!(!config.verbose);
        assert!(!config.offline);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn file_overrides_defaults() {
        let file = "api_url = \"http://localhost:8080\"\ntoken = \"abc\"\nverbose = true\n";
        let config = Config::from_sources(Some(file), env(&[]));
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.token, "abc");
        assert!(config.verbose);
    }

    #[test]
    fn env_overrides_file() {
        let file = "token = \"from-file\"\nverbose = true\n";
        let config = Config::from_sources(
            Some(file),
            env(&[("SL_TOKEN", "from-env"), ("SL_VERBOSE", "false"), ("SL_OFFLINE", "T")]),
        );
        assert_eq!(config.token, "from-env");
        assert!(!config.verbose);
        assert!(config.offline);
    }

    #[test]
    fn unparsable_bool_keeps_lower_layer() {
        let config = Config::from_sources(Some("verbose = true"), env(&[("SL_VERBOSE", "maybe")]));
        assert!(config.verbose);
    }

    #[test]
    fn broken_file_is_ignored() {
        let config = Config::from_sources(Some("token = "), env(&[]));
        assert!(config.token.is_empty());
    }

    #[test]
    fn user_agent_uses_caller_identity() {
        let own = format!("whereis/{}", env!("CARGO_PKG_VERSION"));

        let config = Config::from_sources(None, env(&[("SL_CLI", "slctl"), ("SL_VERSION", "v1.2.0")]));
        assert_eq!(config.user_agent(), format!("slctl/v1.2.0 {own}"));

        // The caller version is passed through as given.
        let config = Config::from_sources(None, env(&[("SL_CLI", "slctl")]));
        assert_eq!(config.user_agent(), format!("slctl/ {own}"));

        let config = Config::from_sources(None, env(&[]));
        assert_eq!(config.user_agent(), own);
    }

    #[test]
    fn expands_variables() {
        let lookup = env(&[("SL_TOKEN", "t0k3n"), ("USER", "matt")]);
        assert_eq!(expand_with("$SL_TOKEN", &lookup), "t0k3n");
        assert_eq!(expand_with("${SL_TOKEN}", &lookup), "t0k3n");
        assert_eq!(expand_with("pre-${USER}-$USER.x", &lookup), "pre-matt-matt.x");
        assert_eq!(expand_with("$MISSING", &lookup), "");
        assert_eq!(expand_with("literal", &lookup), "literal");
    }

    #[test]
    fn lone_dollar_is_kept() {
        let lookup = env(&[]);
        assert_eq!(expand_with("cost $", &lookup), "cost $");
        assert_eq!(expand_with("${open", &lookup), "${open");
    }

    #[test]
    fn bool_spellings() {
        for v in ["1", "t", "T", "true", "TRUE", "True"] {
            assert_eq!(parse_bool(v), Some(true), "{v}");
        }
        for v in ["0", "f", "F", "false", "FALSE", "False"] {
            assert_eq!(parse_bool(v), Some(false), "{v}");
        }
        assert_eq!(parse_bool("yes"), None);
    }
}
