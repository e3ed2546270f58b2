pub mod byte_format;
pub mod commands;
pub mod device;
pub mod device_store;
pub mod lorawan;
pub mod settings;

use std::sync::LazyLock;

use regex::Regex;

static ID_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[0-9a-z](?:[_-]?[0-9a-z]){1,35}$"));

/// Whether `id` is a valid application or device ID.
pub fn valid_id(id: &str) -> bool {
    matches!(&*ID_PATTERN, Ok(pattern) if pattern.is_match(id))
}
