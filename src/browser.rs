#![cfg(not(tarpaulin_include))]

//! Browser runtime
//!
//! Built with `wasm-pack build --target web -- --no-default-features --features wasm`.
//! The server renders the page with initial widget state; `start` picks up
//! the `data-*` hooks in that markup and keeps the widgets live.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Element, Event, HtmlDocument, HtmlElement, HtmlMediaElement, HtmlTextAreaElement, Window};

use crate::clipboard::{ClipboardError, CopyButton, PlatformServices};
use crate::countdown::{COUNTDOWN_INTERVAL_MS, Countdown, CountdownState, CountdownTarget};
use crate::navigation::{Section, SectionNav};
use crate::rotation::{Carousel, Fade, ImagePool};

const AUDIO_DELAY_MS: i32 = 300;

thread_local! {
    static MOUNTED: RefCell<Vec<Interval>> = const { RefCell::new(Vec::new()) };
}

/// `setInterval` registration, cleared when dropped
pub struct Interval {
    window: Window,
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn every(window: &Window, period_ms: i32, on_tick: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut()>::new(on_tick);
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            period_ms,
        )?;
        Ok(Self {
            window: window.clone(),
            id,
            _callback: callback,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.window.clear_interval_with_handle(self.id);
    }
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn document() -> Result<Document, JsValue> {
    window()?.document().ok_or_else(|| JsValue::from_str("no document"))
}

fn now() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(js_sys::Date::now() as i64)
        .single()
        .unwrap_or_else(Utc::now)
}

fn select_all(root: &Element, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = root.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Mounts every widget found on the page
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    let window = window()?;
    let document = document()?;
    let root = document
        .document_element()
        .ok_or_else(|| JsValue::from_str("empty document"))?;

    let mut intervals = Vec::new();
    for element in select_all(&root, "[data-countdown]")? {
        intervals.push(mount_countdown(&window, element)?);
    }
    for element in select_all(&root, "[data-carousel]")? {
        if let Some(interval) = mount_carousel(&window, element)? {
            intervals.push(interval);
        }
    }
    MOUNTED.with(|mounted| mounted.borrow_mut().extend(intervals));

    wire_copy_buttons(&root)?;
    wire_navigation(&root)?;
    wire_open_invitation(&document)?;
    Ok(())
}

/// Clears every interval started by `start`
#[wasm_bindgen]
pub fn stop() {
    MOUNTED.with(|mounted| mounted.borrow_mut().clear());
}

fn mount_countdown(window: &Window, element: Element) -> Result<Interval, JsValue> {
    let target = element
        .get_attribute("data-target-ms")
        .and_then(|ms| ms.parse::<i64>().ok())
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .map(CountdownTarget::at)
        .unwrap_or_else(CountdownTarget::unset);
    let arrived_text = element.get_attribute("data-arrived-text").unwrap_or_default();
    let units = element
        .query_selector("[data-countdown-units]")?
        .ok_or_else(|| JsValue::from_str("countdown without units"))?;

    let mut countdown = Countdown::new(target, now());
    paint_countdown(&units, &countdown, &arrived_text);

    Interval::every(window, COUNTDOWN_INTERVAL_MS as i32, move || {
        countdown.tick(now());
        paint_countdown(&units, &countdown, &arrived_text);
    })
}

fn paint_countdown(units: &Element, countdown: &Countdown, arrived_text: &str) {
    match countdown.state() {
        CountdownState::Counting(_) => {
            // digits and fixed labels only, nothing user supplied
            let markup: String = countdown
                .display_fields()
                .into_iter()
                .map(|(label, value)| {
                    format!("<div class=\"unit\"><strong>{}</strong><span>{}</span></div>", value, label)
                })
                .collect();
            units.set_inner_html(&markup);
        }
        CountdownState::Arrived => units.set_text_content(Some(arrived_text)),
    }
}

fn mount_carousel(window: &Window, element: Element) -> Result<Option<Interval>, JsValue> {
    let layers: Vec<HtmlElement> = select_all(&element, "[data-layer]")?
        .into_iter()
        .filter_map(|layer| layer.dyn_into::<HtmlElement>().ok())
        .collect();
    let period = element
        .get_attribute("data-interval")
        .and_then(|ms| ms.parse::<i32>().ok())
        .filter(|ms| *ms > 0);
    let fade = Fade {
        dimmed_opacity: attr_u8(&element, "data-dimmed").unwrap_or(Fade::BACKDROP.dimmed_opacity),
        focused_z: attr_u8(&element, "data-focused-z").unwrap_or(Fade::BACKDROP.focused_z),
    };

    let (Some(period), Ok(pool)) = (period, ImagePool::new("page", (0..layers.len()).map(|i| i.to_string()).collect()))
    else {
        return Ok(None);
    };

    let mut carousel = Carousel::new(pool, fade);
    Interval::every(window, period, move || {
        carousel.advance();
        for layer in carousel.layers() {
            if let Some(element) = layers.get(layer.index) {
                let style = element.style();
                let _ = style.set_property("opacity", &format!("{}%", layer.opacity));
                let _ = style.set_property("z-index", &layer.z.to_string());
            }
        }
    })
    .map(Some)
}

fn attr_u8(element: &Element, name: &str) -> Option<u8> {
    element.get_attribute(name).and_then(|v| v.parse().ok())
}

fn wire_copy_buttons(root: &Element) -> Result<(), JsValue> {
    for element in select_all(root, "[data-copy]")? {
        let text = element.get_attribute("data-copy").unwrap_or_default();
        let message = element.get_attribute("data-message").unwrap_or_default();
        let idle = element.text_content().unwrap_or_default();
        let copied = element.get_attribute("data-copied-label").unwrap_or_default();
        let mut button = CopyButton::new(&idle, &copied);

        let target = element.clone();
        let on_click = Closure::<dyn FnMut()>::new(move || {
            button.click(&mut BrowserPlatform, &text, &message);
            target.set_text_content(Some(button.label()));
            let _ = target.class_list().add_1("copied");
        });
        element.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        // listeners live as long as the page
        on_click.forget();
    }
    Ok(())
}

fn wire_navigation(root: &Element) -> Result<(), JsValue> {
    let links = select_all(root, "[data-nav]")?;
    let sections = links
        .iter()
        .filter_map(|link| {
            let id = link.get_attribute("data-nav")?;
            Some(Section::new(&id, &link.text_content().unwrap_or_default()))
        })
        .collect();
    let nav = Rc::new(RefCell::new(SectionNav::new(sections)));
    let links = Rc::new(links);

    for link in links.iter() {
        let id = link.get_attribute("data-nav").unwrap_or_default();
        let nav = Rc::clone(&nav);
        let all = Rc::clone(&links);
        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            let mut nav = nav.borrow_mut();
            let Some(anchor) = nav.select(&id).map(str::to_string) else {
                return;
            };
            for other in all.iter() {
                let active = other.get_attribute("data-nav").is_some_and(|v| nav.is_active(&v));
                let _ = other.class_list().toggle_with_force("active", active);
            }
            if let Ok(document) = document() {
                if let Some(section) = document.get_element_by_id(&anchor) {
                    section.scroll_into_view();
                }
            }
        });
        link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}

fn wire_open_invitation(page: &Document) -> Result<(), JsValue> {
    let Some(button) = page.query_selector("[data-open-invitation]")? else {
        return Ok(());
    };

    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        let Ok(document) = document() else {
            return;
        };
        if let Some(cover) = document.get_element_by_id("cover") {
            let _ = cover.set_attribute("hidden", "");
        }
        if let Some(main) = document.get_element_by_id("invitation") {
            let _ = main.remove_attribute("hidden");
        }
        play_audio_later();
    });
    button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

fn play_audio_later() {
    let play = Closure::once_into_js(move || {
        let audio = document()
            .ok()
            .and_then(|d| d.query_selector("audio").ok().flatten())
            .and_then(|a| a.dyn_into::<HtmlMediaElement>().ok());
        if let Some(Ok(promise)) = audio.map(|a| a.play()) {
            spawn_ignored(promise);
        }
    });
    if let Ok(window) = window() {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(play.unchecked_ref(), AUDIO_DELAY_MS);
    }
}

/// Awaits a promise and drops its outcome
fn spawn_ignored(promise: Promise) {
    spawn_local(async move {
        let _ = JsFuture::from(promise).await;
    });
}

/// `PlatformServices` backed by the DOM
pub struct BrowserPlatform;

impl BrowserPlatform {
    fn write_text_fn() -> Option<(JsValue, Function)> {
        let navigator = window().ok()?.navigator();
        let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard")).ok()?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return None;
        }
        let write = Reflect::get(&clipboard, &JsValue::from_str("writeText")).ok()?;
        Some((clipboard, write.dyn_into::<Function>().ok()?))
    }
}

fn js_error(value: JsValue) -> ClipboardError {
    ClipboardError(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

impl PlatformServices for BrowserPlatform {
    fn has_clipboard(&self) -> bool {
        Self::write_text_fn().is_some()
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), ClipboardError> {
        let (clipboard, write) =
            Self::write_text_fn().ok_or_else(|| ClipboardError("clipboard unavailable".to_string()))?;
        let promise = write
            .call1(&clipboard, &JsValue::from_str(text))
            .map_err(js_error)?
            .dyn_into::<Promise>()
            .map_err(js_error)?;
        spawn_ignored(promise);
        Ok(())
    }

    fn legacy_copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        let document = document().map_err(js_error)?;
        let body = document
            .body()
            .ok_or_else(|| ClipboardError("no body".to_string()))?;
        let field = document
            .create_element("textarea")
            .map_err(js_error)?
            .dyn_into::<HtmlTextAreaElement>()
            .map_err(|_| ClipboardError("not a textarea".to_string()))?;
        field.set_value(text);
        let _ = field.style().set_property("position", "fixed");
        let _ = field.style().set_property("left", "-9999px");

        body.append_child(&field).map_err(js_error)?;
        field.select();
        let copied = document
            .dyn_into::<HtmlDocument>()
            .map_err(|_| ClipboardError("not an html document".to_string()))
            .and_then(|html| html.exec_command("copy").map_err(js_error));
        field.remove();

        match copied {
            Ok(true) => Ok(()),
            Ok(false) => Err(ClipboardError("copy command refused".to_string())),
            Err(e) => Err(e),
        }
    }

    fn show_confirmation(&mut self, message: &str) {
        let Ok(document) = document() else {
            return;
        };
        let build = || -> Result<(), JsValue> {
            let overlay = document.create_element("div")?;
            overlay.set_class_name("overlay");
            let dialog = document.create_element("div")?;
            let text = document.create_element("p")?;
            text.set_text_content(Some(message));
            let ok = document.create_element("button")?.dyn_into::<HtmlElement>()?;
            ok.set_text_content(Some("OK"));

            let dismissed = overlay.clone();
            let dismiss = Closure::once_into_js(move || dismissed.remove());
            ok.set_onclick(Some(dismiss.unchecked_ref()));

            dialog.append_child(&text)?;
            dialog.append_child(&ok)?;
            overlay.append_child(&dialog)?;
            document
                .body()
                .ok_or_else(|| JsValue::from_str("no body"))?
                .append_child(&overlay)?;
            Ok(())
        };
        if let Err(e) = build() {
            log::debug!("confirmation dialog not shown: {:?}", e);
        }
    }
}
