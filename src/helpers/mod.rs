pub mod config_helper;
pub mod format;
pub mod path_safety;
