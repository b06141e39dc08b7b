use leptos::prelude::*;

use volcano_shared::VolcanoDetail;
use volcano_shared::detail::QUERY_KEYS;

/// Read the detail fields out of the current page's query string.
fn detail_from_location() -> VolcanoDetail {
    let params = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok());
    let Some(params) = params else {
        return VolcanoDetail::default();
    };
    let values: Vec<(&str, String)> = QUERY_KEYS
        .iter()
        .filter_map(|&key| params.get(key).map(|value| (key, value)))
        .collect();
    VolcanoDetail::from_query(values.iter().map(|(k, v)| (*k, v.as_str())))
}

#[component]
fn Field(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div style="display: flex; gap: 12px; padding: 6px 0; border-bottom: 1px solid #1d212d;">
            <span style="width: 110px; color: #9a9590; flex-shrink: 0;">{label}</span>
            <span>{value}</span>
        </div>
    }
}

/// Standalone page describing one volcano, reached by clicking its marker.
#[component]
pub fn DetailPage() -> impl IntoView {
    let detail = detail_from_location();
    let pct = detail.elevation_percent();
    let coords = detail.coordinates();
    let elevation = detail.elevation_label();

    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(&format!("{} | Volcano", detail.name));
    }

    view! {
        <div style="min-height: 100vh; background: #000; color: #e2e0d8; font-family: Arial, sans-serif; padding: 32px;">
            <div style="max-width: 560px; margin: 0 auto;">
                <div id="type" style="font-size: 0.8rem; color: #ff7c00; text-transform: uppercase; letter-spacing: 0.08em;">
                    {detail.category.clone()}
                </div>
                <h1 id="name" style="margin: 4px 0 20px; font-size: 1.6rem;">{detail.name.clone()}</h1>
                <Field label="Id" value=detail.id />
                <Field label="Country" value=detail.country />
                <Field label="Type" value=detail.category />
                <Field label="Status" value=detail.status />
                <Field label="Last Eruption" value=detail.eruption />
                <Field label="Coordinates" value=coords />
                <div style="margin-top: 20px;">
                    <div style="height: 10px; background: #1d212d; border-radius: 5px; overflow: hidden;">
                        <div
                            id="elev-bar"
                            style=format!("height: 100%; width: {pct}%; background: #ff7c00;")
                        />
                    </div>
                    <div id="elev-label" style="margin-top: 6px; font-size: 0.85rem;">{elevation}</div>
                </div>
                <a href="/" style="display: inline-block; margin-top: 28px; color: #ff7c00;">"Back to map"</a>
            </div>
        </div>
    }
}
