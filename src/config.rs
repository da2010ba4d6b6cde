#[derive(Debug)]
pub(crate) struct Config {
    pub(crate) api_base_url: String,
    pub(crate) page_path: std::path::PathBuf,
    pub(crate) target_element: String,

    pub(crate) log_dir: std::path::PathBuf,
    pub(crate) log_to_console: bool,
}

pub(crate) const DEFAULT_API_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";
pub(crate) const DEFAULT_TARGET_ELEMENT: &str = "latest-hn";

static CONFIG: std::sync::LazyLock<Config> = std::sync::LazyLock::new(|| {
    // The .env file is optional, every key has a default.
    let _ = dotenvy::dotenv();
    Config::from_lookup(|key| std::env::var(key).ok())
});

pub(crate) fn config() -> &'static Config {
    &CONFIG
}

impl Config {
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_base_url: lookup("HN_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            page_path: lookup("LATEST_HN_PAGE")
                .unwrap_or_else(|| "index.html".to_string())
                .into(),
            target_element: lookup("LATEST_HN_ELEMENT")
                .unwrap_or_else(|| DEFAULT_TARGET_ELEMENT.to_string()),
            log_dir: lookup("LOG_DIR")
                .unwrap_or_else(|| "./log".to_string())
                .into(),
            log_to_console: lookup("LOG_TO_CONSOLE")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}
