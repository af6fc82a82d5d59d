//! Query string parameters shared by the controllers.

use serde::Deserialize;

/// `?query=` for user search. A missing query behaves like an empty one.
#[derive(Deserialize, Debug, Default)]
pub struct SearchParam {
    #[serde(default)]
    pub query: String,
}

/// Feed pagination, `?friends=true&page=0&page_size=20`.
#[derive(Deserialize, Debug, Default)]
pub struct FeedParam {
    #[serde(default)]
    pub friends: bool,
    pub page: Option<u64>,
    #[serde(alias = "pageSize")]
    pub page_size: Option<u64>,
}

#[derive(Deserialize, Debug, Default)]
pub struct LimitParam {
    pub limit: Option<u64>,
}

/// `?window=` in days for the balance report; only 30 selects the long window.
///
/// Kept as text so unparseable values fall back to the default instead of a rejection.
#[derive(Deserialize, Debug, Default)]
pub struct WindowParam {
    pub window: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct CalendarParam {
    pub days: Option<u32>,
}
