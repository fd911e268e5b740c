use serde::{Deserialize, Serialize};

use crate::types::presentation::DEFAULT_DESKTOP_MIN_WIDTH;

pub const DEFAULT_API_BASE_URL: &str = "https://mock.echoapi.com/mock/3ddd7080b35017";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Client configuration. Every field falls back to its default when absent
/// from the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Base URL of the bookmark API, without the `/bookmarks` suffix.
    pub api_base_url: String,
    /// `limit` sent with every list request.
    pub page_size: u32,
    pub request_timeout_secs: u64,
    /// Viewport width at and above which the layout is desktop.
    pub desktop_min_width: u32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            desktop_min_width: DEFAULT_DESKTOP_MIN_WIDTH,
        }
    }
}
