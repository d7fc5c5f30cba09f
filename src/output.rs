use std::sync::OnceLock;

use serde::Serialize;

static QUIET: OnceLock<bool> = OnceLock::new();

pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("STUDYDECK_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}

/// Render records as relaxed Extended JSON (ObjectIds as `{"$oid"}`, dates as ISO-8601)
pub fn to_json<T: Serialize + ?Sized>(records: &T) -> crate::Result<serde_json::Value> {
    Ok(bson::to_bson(records)?.into_relaxed_extjson())
}
