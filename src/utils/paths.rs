use dirs::home_dir;
use std::{env, path::Path, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".expense_tracker";
const DATA_DIR: &str = "data";
pub const HOME_ENV: &str = "EXPENSE_TRACKER_HOME";

/// Returns the application home, defaulting to `~/.expense_tracker`.
pub fn app_home_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding the expense and budget stores under `home`.
pub fn data_dir_in(home: &Path) -> PathBuf {
    home.join(DATA_DIR)
}
