mod app;
mod canvas;
mod data;
mod detail;
mod render_loop;
mod renderer;

use leptos::mount::mount_to;
use std::any::Any;
use std::cell::RefCell;
use wasm_bindgen::JsCast;

thread_local! {
    static APP_MOUNT_HANDLE: RefCell<Option<Box<dyn Any>>> = RefCell::new(None);
}

/// Whether a page path addresses the single-volcano page.
fn is_detail_path(path: &str) -> bool {
    let path = path.trim_end_matches('/');
    path.ends_with(canvas::DETAIL_PATH) || path.ends_with("volcano.html")
}

fn main() {
    console_error_panic_hook::set_once();
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let mount_target = document
        .get_element_by_id("app")
        .and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .or_else(|| document.body());
    let Some(target) = mount_target else {
        return;
    };
    let path = window.location().pathname().unwrap_or_default();

    APP_MOUNT_HANDLE.with(move |slot| {
        // Drop any earlier mount so its effects stop before the new tree starts.
        let _old = slot.borrow_mut().take();
        let handle: Box<dyn Any> = if is_detail_path(&path) {
            Box::new(mount_to(target, detail::DetailPage))
        } else {
            Box::new(mount_to(target, app::App))
        };
        *slot.borrow_mut() = Some(handle);
    });
}
