use std::sync::atomic::{AtomicBool, Ordering};

use web_sys::HtmlImageElement;

use volcano_shared::Dataset;

pub const DATASET_URL: &str = "/data/volcanoes.csv";
pub const MAP_IMAGE_URL: &str = "/img/world-map.png";

static DATASET_WARNED: AtomicBool = AtomicBool::new(false);
static MAP_IMAGE_WARNED: AtomicBool = AtomicBool::new(false);

fn warn_once(flag: &AtomicBool, message: &str) {
    if flag
        .compare_exchange(false, true, Ordering::Relaxed, Ordering::Relaxed)
        .is_ok()
    {
        web_sys::console::warn_1(&message.into());
    }
}

/// Fetch and parse the volcano table.
pub async fn fetch_dataset() -> Result<Dataset, String> {
    let resp = gloo_net::http::Request::get(DATASET_URL)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    let text = resp
        .text()
        .await
        .map_err(|e| format!("read error: {e}"))?;
    Ok(Dataset::from_text(&text))
}

pub fn warn_dataset(err: &str) {
    warn_once(
        &DATASET_WARNED,
        &format!("Failed to load volcano dataset from {DATASET_URL}: {err}"),
    );
}

/// Load and decode the world map. `None` (after one console warning) when the
/// image is unavailable; the map then draws without a backdrop.
pub async fn load_map_image() -> Option<HtmlImageElement> {
    let Ok(image) = HtmlImageElement::new() else {
        warn_once(&MAP_IMAGE_WARNED, "Failed to create map image element.");
        return None;
    };
    image.set_src(MAP_IMAGE_URL);
    match wasm_bindgen_futures::JsFuture::from(image.decode()).await {
        Ok(_) => Some(image),
        Err(err) => {
            warn_once(
                &MAP_IMAGE_WARNED,
                &format!("Failed to decode map image: {:?}", err),
            );
            None
        }
    }
}
