//! Video identifier extraction from page addresses.

use url::Url;

const WATCH_PATH: &str = "/watch";
const EMBED_PREFIX: &str = "/embed/";

/// Extract the video id from a watch or embed address.
///
/// `/watch?v=<id>` yields the first `v` parameter and `/embed/<id>` the
/// path remainder. Any other address, or one that does not parse, has no
/// video.
pub fn video_id_from_url(address: &str) -> Option<String> {
    let url = Url::parse(address).ok()?;
    let path = url.path();

    let id = if path == WATCH_PATH {
        url.query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())?
    } else if let Some(rest) = path.strip_prefix(EMBED_PREFIX) {
        rest.to_string()
    } else {
        return None;
    };

    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}
