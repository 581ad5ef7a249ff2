pub const APP_NAME: &str = "docsearch";
pub const AUTHOR: &str = "docsearch";
pub const TOP_LEVEL_DOMAIN: &str = "org";

pub const GUI_CONFIG_FILE_NAME: &str = "gui.toml";
pub const HISTORY_FILE_NAME: &str = "search-history.json";

/// Environment variable holding the backend base URL, it wins over the config file
pub const API_URL_ENV: &str = "DOCSEARCH_API_URL";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
