pub mod chat_panel;
pub mod error_banner;
pub mod header;
pub mod loading_overlay;
pub mod nav_bar;
pub mod report_card;
pub mod report_view;
pub mod scan_view;
pub mod settings_panel;
