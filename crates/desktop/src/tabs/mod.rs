pub mod about_tab;
pub mod main_tab;
pub mod settings_tab;
