use leptos::prelude::*;

use volcano_shared::detail::format_number;
use volcano_shared::glyph::svg::glyph_svg;
use volcano_shared::hover::tooltip_position;
use volcano_shared::layout::{HEADER_H, SIDEBAR_W};
use volcano_shared::scene::ALL_LABEL;
use volcano_shared::{Dataset, FilterSelection, GlyphKind, GlyphRegistry, PlacedPoint, Rgba};

use crate::canvas::MapCanvas;
use crate::data;

/// Legend swatch color for every glyph.
const LEGEND_COLOR: Rgba = Rgba::rgb(255, 124, 0);

pub(crate) fn window_size() -> (f64, f64) {
    let Some(window) = web_sys::window() else {
        return (1200.0, 800.0);
    };
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1200.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    (w, h)
}

/// Single query-string value from the current page URL.
pub(crate) fn url_param(name: &str) -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search)
        .ok()?
        .get(name)
}

/// Newtype wrappers so each signal gets its own context slot.
#[derive(Clone, Copy)]
pub(crate) struct LoadedData(pub RwSignal<Option<Dataset>>);
#[derive(Clone, Copy)]
pub(crate) struct ActiveFilter(pub RwSignal<FilterSelection>);
#[derive(Clone, Copy)]
pub(crate) struct Hovered(pub RwSignal<Option<PlacedPoint>>);

/// Root map page. Provides the shared signals via context and loads the dataset.
#[component]
pub fn App() -> impl IntoView {
    let dataset: RwSignal<Option<Dataset>> = RwSignal::new(None);
    let filter: RwSignal<FilterSelection> = RwSignal::new(FilterSelection::All);
    let hovered: RwSignal<Option<PlacedPoint>> = RwSignal::new(None);
    let mouse_pos: RwSignal<(f64, f64)> = RwSignal::new((0.0, 0.0));

    provide_context(LoadedData(dataset));
    provide_context(ActiveFilter(filter));
    provide_context(Hovered(hovered));
    provide_context(mouse_pos);

    // Parse once at load; the URL `type` only selects a filter if it names a known type.
    Effect::new(move || {
        wasm_bindgen_futures::spawn_local(async move {
            match data::fetch_dataset().await {
                Ok(loaded) => {
                    let param = url_param("type");
                    filter.set(FilterSelection::from_param(
                        param.as_deref(),
                        loaded.categories(),
                    ));
                    dataset.set(Some(loaded));
                }
                Err(e) => data::warn_dataset(&e),
            }
        });
    });

    view! {
        <div style="position: fixed; inset: 0; display: flex; flex-direction: column; background: #000; color: #e2e0d8; font-family: Arial, sans-serif;">
            <header style=format!("height: {HEADER_H}px; flex-shrink: 0; display: flex; align-items: center; padding: 0 16px; border-bottom: 1px solid #282c3e;")>
                <h1 style="font-size: 1.1rem; margin: 0; font-weight: 700;">"Volcanoes of the World"</h1>
                <span style="margin-left: 16px; font-size: 0.8rem; color: #9a9590;">
                    {move || dataset.with(|d| match d {
                        Some(d) => format!("{} volcanoes", d.rows().len()),
                        None => "Loading data".to_string(),
                    })}
                </span>
            </header>
            <div style="flex: 1; display: flex; min-height: 0;">
                <div id="canvas-holder" style="flex: 1; padding: 12px 16px; overflow: hidden;">
                    <MapCanvas />
                </div>
                <Sidebar />
            </div>
            <Tooltip />
        </div>
    }
}

/// Type filter dropdown and the per-type glyph legend.
#[component]
fn Sidebar() -> impl IntoView {
    let LoadedData(dataset) = expect_context();
    let ActiveFilter(filter) = expect_context();

    let categories = Memo::new(move |_| {
        dataset.with(|d| {
            d.as_ref()
                .map(|d| d.categories().to_vec())
                .unwrap_or_default()
        })
    });

    view! {
        <aside style=format!("width: {}px; flex-shrink: 0; box-sizing: border-box; padding: 16px; border-left: 1px solid #282c3e; overflow-y: auto;", SIDEBAR_W - 32.0)>
            <label for="typeFilter" style="display: block; font-size: 0.75rem; color: #9a9590; margin-bottom: 4px;">"Type"</label>
            <select
                id="typeFilter"
                style="width: 100%; padding: 4px; background: #13161f; color: #e2e0d8; border: 1px solid #282c3e; border-radius: 4px;"
                on:change=move |ev| filter.set(FilterSelection::from_choice(&event_target_value(&ev)))
            >
                <option value=ALL_LABEL prop:selected=move || filter.get() == FilterSelection::All>
                    {ALL_LABEL}
                </option>
                <For
                    each=move || categories.get()
                    key=|category| category.clone()
                    children=move |category| {
                        let value = category.clone();
                        let selected = category.clone();
                        view! {
                            <option
                                value=value
                                prop:selected=move || filter.get().choice() == selected
                            >
                                {category}
                            </option>
                        }
                    }
                />
            </select>
            <Legend categories=categories />
        </aside>
    }
}

#[component]
fn Legend(categories: Memo<Vec<String>>) -> impl IntoView {
    let entries = Memo::new(move |_| {
        let categories = categories.get();
        let registry = GlyphRegistry::from_categories(&categories);
        categories
            .into_iter()
            .map(|category| {
                let kind = registry.get(&category).unwrap_or(GlyphKind::Circle);
                (glyph_svg(kind, LEGEND_COLOR), category)
            })
            .collect::<Vec<_>>()
    });

    view! {
        <h2 style="font-size: 0.8rem; margin: 18px 0 6px; color: #9a9590; font-weight: 400;">"Legend"</h2>
        <ul id="legend-types" style="list-style: none; margin: 0; padding: 0; font-size: 0.78rem;">
            {move || {
                entries
                    .get()
                    .into_iter()
                    .map(|(svg, category)| view! {
                        <li style="display: flex; align-items: center; gap: 8px; margin: 6px 0;">
                            <span class="swatch" style="display: inline-flex; width: 16px; height: 16px; flex-shrink: 0;" inner_html=svg />
                            {category}
                        </li>
                    })
                    .collect_view()
            }}
        </ul>
    }
}

/// Tooltip next to the cursor for the hovered volcano, flipped to stay on screen.
#[component]
fn Tooltip() -> impl IntoView {
    let Hovered(hovered) = expect_context();
    let mouse_pos: RwSignal<(f64, f64)> = expect_context();
    let tip_ref = NodeRef::<leptos::html::Div>::new();

    let position = Memo::new(move |_| {
        let cursor = mouse_pos.get();
        hovered.track();
        // Size from the previous layout; zero until first shown.
        let (w, h) = tip_ref
            .get_untracked()
            .map(|el| (el.offset_width() as f64, el.offset_height() as f64))
            .unwrap_or((0.0, 0.0));
        let (vw, vh) = window_size();
        tooltip_position(cursor, w, h, vw, vh)
    });

    view! {
        <div
            id="tip"
            node_ref=tip_ref
            hidden=move || hovered.with(|h| h.is_none())
            style:left=move || format!("{}px", position.get().0)
            style:top=move || format!("{}px", position.get().1)
            style="position: fixed; pointer-events: none; z-index: 100; background: #161921; border: 1px solid #282c3e; border-radius: 6px; padding: 8px 10px; font-size: 0.75rem; line-height: 1.45; box-shadow: 0 4px 16px rgba(0,0,0,0.5); max-width: 260px;"
        >
            {move || hovered.get().map(|p| view! {
                <div class="name" style="font-weight: 700; font-size: 0.85rem;">{p.name}</div>
                <div>"Country: " {p.country}</div>
                <div>"Location: " {p.location}</div>
                <div>"Elevation: " {format_number(p.elevation)} " m"</div>
                <div>"Type: " {p.category}</div>
                <div>"Last Eruption: " {p.eruption}</div>
            })}
        </div>
    }
}
