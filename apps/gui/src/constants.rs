pub const APP_ID: &str = "docsearch";

pub const ID_PANEL_SEARCH_BAR: &str = "search_bar_panel";
pub const ID_PANEL_SEARCH_OPTIONS: &str = "search_options_panel";
pub const ID_PANEL_STATUS_BAR: &str = "status_bar_panel";
pub const ID_SALT_RESULT_COUNT: &str = "result_count_combo";
pub const ID_SALT_DOCUMENT_FIELDS: &str = "document_fields_grid";

pub const TEXT_STYLE_SEARCH_BAR: &str = "SearchBar";
pub const TEXT_STYLE_STATUS_BAR: &str = "StatusBar";

pub const LANGUAGE: &str = "zh-TW";
pub const FALLBACK_LANGUAGE: &str = "en";
