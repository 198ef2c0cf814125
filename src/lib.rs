pub mod api_client;
pub mod autocomplete;
pub mod config;
pub mod debouncer;
pub mod institution;
pub mod logging;
pub mod table_display;
pub mod tui_app;
pub mod widgets;
