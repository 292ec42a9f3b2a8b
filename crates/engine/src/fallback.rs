//! Responses synthesized when neither the cache nor the network can answer.
//!
//! The bodies are part of the contract with existing clients and must stay
//! byte-for-byte identical.

use offcache_core::Response;

pub const UNAVAILABLE_STATUS: u16 = 503;
pub const UNAVAILABLE_TEXT: &str = "Service Unavailable";

/// Static asset could neither be read from cache nor fetched.
pub const ASSET_ERROR_BODY: &str = "Ошибка загрузки ресурса";

/// Page or data request while offline with nothing cached.
pub const OFFLINE_USE_CACHE_BODY: &str = "Вы оффлайн. Используйте кэшированные данные.";

/// Default-strategy request while offline with nothing cached.
pub const OFFLINE_BODY: &str = "Вы оффлайн.";

pub const PLACEHOLDER_CONTENT_TYPE: &str = "image/svg+xml";

/// 100x100 light-gray square with a centered gray "No Image" label.
pub const PLACEHOLDER_SVG: &str = r##"<svg width="100" height="100" xmlns="http://www.w3.org/2000/svg"><rect width="100" height="100" fill="#ddd"/><text x="50" y="50" text-anchor="middle" dy=".3em" fill="#999" font-size="12">No Image</text></svg>"##;

fn unavailable(body: &'static str) -> Response {
    Response::new(UNAVAILABLE_STATUS, UNAVAILABLE_TEXT, body)
}

pub fn asset_unavailable() -> Response {
    unavailable(ASSET_ERROR_BODY)
}

pub fn offline_use_cache() -> Response {
    unavailable(OFFLINE_USE_CACHE_BODY)
}

pub fn offline() -> Response {
    unavailable(OFFLINE_BODY)
}

/// A valid image, not an error: served with 200.
pub fn image_placeholder() -> Response {
    Response::new(200, "OK", PLACEHOLDER_SVG).with_header("Content-Type", PLACEHOLDER_CONTENT_TYPE)
}
