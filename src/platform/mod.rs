// Fusen platform paths
// Resolves the per-user configuration directory on Windows, macOS and Linux.

use std::env;
use std::path::PathBuf;

/// Returns the platform-specific configuration directory for Fusen.
///
/// - **Linux**: `$XDG_CONFIG_HOME/fusen`, else `~/.config/fusen`
/// - **macOS**: `~/Library/Application Support/Fusen`
/// - **Windows**: `%APPDATA%/Fusen`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata = env::var("APPDATA").unwrap_or_else(|_| String::from("."));
        PathBuf::from(appdata).join("Fusen")
    }
    #[cfg(target_os = "macos")]
    {
        PathBuf::from(home_dir())
            .join("Library")
            .join("Application Support")
            .join("Fusen")
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        match env::var("XDG_CONFIG_HOME") {
            Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("fusen"),
            _ => PathBuf::from(home_dir()).join(".config").join("fusen"),
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn home_dir() -> String {
    env::var("HOME").unwrap_or_else(|_| String::from("/tmp"))
}
