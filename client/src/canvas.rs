use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, MouseEvent, PointerEvent};

use volcano_shared::detail::query_pairs;
use volcano_shared::layout::{canvas_size, fit_map_rect};
use volcano_shared::{GeoProjector, MapSession, PlacedPoint};

use crate::app::{ActiveFilter, Hovered, LoadedData, window_size};
use crate::data;
use crate::render_loop::FrameLoop;
use crate::renderer::{CanvasGlyphs, draw_grid};

const BACKGROUND: &str = "#000000";
pub const DETAIL_PATH: &str = "/volcano";

/// Background, map image, graticule and one scene pass over the session.
fn draw_frame(
    ctx: &CanvasRenderingContext2d,
    w: f64,
    h: f64,
    image: Option<&HtmlImageElement>,
    session: Option<&mut MapSession>,
) {
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, w, h);

    let (image_w, image_h) = image
        .map(|img| (img.natural_width() as f64, img.natural_height() as f64))
        .unwrap_or((0.0, 0.0));
    let rect = fit_map_rect(w, h, image_w, image_h);
    if let Some(img) = image {
        ctx.draw_image_with_html_image_element_and_dw_and_dh(img, rect.x, rect.y, rect.w, rect.h)
            .ok();
    }

    match session {
        Some(session) => {
            draw_grid(ctx, session.projector(), &rect);
            session.render(&rect, &mut CanvasGlyphs::new(ctx));
        }
        None => draw_grid(ctx, &GeoProjector::default(), &rect),
    }
}

fn detail_href(point: &PlacedPoint) -> String {
    let query = query_pairs(point)
        .into_iter()
        .map(|(key, value)| {
            let encoded: String = js_sys::encode_uri_component(&value).into();
            format!("{key}={encoded}")
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{DETAIL_PATH}?{query}")
}

/// World map canvas. Redraws every animation frame and publishes the marker
/// under the cursor.
#[component]
pub fn MapCanvas() -> impl IntoView {
    let LoadedData(dataset) = expect_context();
    let ActiveFilter(filter) = expect_context();
    let Hovered(hovered) = expect_context();
    let mouse_pos: RwSignal<(f64, f64)> = expect_context();

    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    let session: Rc<RefCell<Option<MapSession>>> = Rc::new(RefCell::new(None));
    let map_image: Rc<RefCell<Option<HtmlImageElement>>> = Rc::new(RefCell::new(None));
    // Cursor in canvas-local pixels; None while outside the canvas.
    let cursor: Rc<Cell<Option<(f64, f64)>>> = Rc::new(Cell::new(None));
    // Cached 2D context (invalidated on canvas resize)
    let cached_ctx: Rc<RefCell<Option<CanvasRenderingContext2d>>> = Rc::new(RefCell::new(None));

    // New session whenever a dataset arrives
    Effect::new({
        let session = session.clone();
        move || {
            dataset.with(|loaded| {
                let Some(loaded) = loaded else {
                    return;
                };
                let mut next = MapSession::new(loaded.clone(), None);
                next.set_filter(filter.get_untracked());
                *session.borrow_mut() = Some(next);
            });
        }
    });

    // Filter changes apply from the next frame
    Effect::new({
        let session = session.clone();
        move || {
            let selection = filter.get();
            if let Some(active) = session.borrow_mut().as_mut() {
                active.set_filter(selection);
            }
        }
    });

    Effect::new({
        let map_image = map_image.clone();
        move || {
            let map_image = map_image.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Some(image) = data::load_map_image().await {
                    *map_image.borrow_mut() = Some(image);
                }
            });
        }
    });

    let frame_loop = FrameLoop::new({
        let session = session.clone();
        let map_image = map_image.clone();
        let cursor = cursor.clone();
        move || {
            let Some(canvas) = canvas_ref.get_untracked() else {
                return false;
            };
            let canvas: &HtmlCanvasElement = &canvas;

            let (win_w, win_h) = window_size();
            let (w, h) = canvas_size(win_w, win_h);
            let (px_w, px_h) = (w as u32, h as u32);
            if canvas.width() != px_w || canvas.height() != px_h {
                canvas.set_width(px_w);
                canvas.set_height(px_h);
                cached_ctx.borrow_mut().take();
            }

            let ctx = {
                let mut ctx_cache = cached_ctx.borrow_mut();
                if ctx_cache.is_none() {
                    let Some(ctx) = canvas
                        .get_context("2d")
                        .ok()
                        .flatten()
                        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
                    else {
                        return true;
                    };
                    *ctx_cache = Some(ctx);
                }
                let Some(ctx) = ctx_cache.clone() else {
                    return true;
                };
                ctx
            };

            let mut session = session.borrow_mut();
            draw_frame(&ctx, w, h, map_image.borrow().as_ref(), session.as_mut());

            let hit = match (session.as_ref(), cursor.get()) {
                (Some(active), Some(at)) => active.hover(at).cloned(),
                _ => None,
            };
            let pointer = if hit.is_some() { "pointer" } else { "default" };
            web_sys::HtmlElement::style(canvas).set_property("cursor", pointer).ok();
            if hit != hovered.get_untracked() {
                hovered.set(hit);
            }
            true
        }
    });
    let frame_loop = Rc::new(frame_loop);

    // Start ticking once the canvas is in the DOM
    Effect::new({
        let frame_loop = frame_loop.clone();
        move || {
            if canvas_ref.get().is_some() {
                frame_loop.start();
            }
        }
    });

    // --- Input handlers ---

    let on_pointer_move = {
        let cursor = cursor.clone();
        move |e: PointerEvent| {
            let local = canvas_ref
                .get_untracked()
                .map(|el| {
                    let rect = el.get_bounding_client_rect();
                    (
                        e.client_x() as f64 - rect.left(),
                        e.client_y() as f64 - rect.top(),
                    )
                })
                .unwrap_or((e.offset_x() as f64, e.offset_y() as f64));
            cursor.set(Some(local));
            mouse_pos.set((e.client_x() as f64, e.client_y() as f64));
        }
    };

    let on_pointer_leave = {
        let cursor = cursor.clone();
        move |_: PointerEvent| {
            cursor.set(None);
        }
    };

    let on_click = move |_: MouseEvent| {
        let Some(point) = hovered.get_untracked() else {
            return;
        };
        if let Some(window) = web_sys::window() {
            window.location().set_href(&detail_href(&point)).ok();
        }
    };

    view! {
        <canvas
            node_ref=canvas_ref
            style="display: block; touch-action: none;"
            on:pointermove=on_pointer_move
            on:pointerleave=on_pointer_leave
            on:click=on_click
        />
    }
}
