//! Browser binding for the page-interaction layer.
//!
//! Implements the capability traits over `web-sys`, builds the shared
//! [`Page`] once the document is ready and installs the click, scroll,
//! intersection and color-scheme listeners. Requires a browser environment;
//! only compiled with the `hydrate` feature.
//!
//! DESIGN
//! ======
//! The page lives in an `Rc<RefCell<..>>` held by a thread-local. Every
//! browser callback reaches it through a [`PageSink`] holding a weak
//! back-reference, so callbacks never keep the page alive and never nest
//! borrows: an event arriving while the page is borrowed is dropped with a
//! debug log.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MediaQueryListEvent, MouseEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, ScrollToOptions, Storage, Window,
};

use crate::config::PageConfig;
use crate::consts;
use crate::dom::{Dom, ElementId, Selector};
use crate::error::BindError;
use crate::observer::{IntersectionEntry, Observer, Watch, WatchOptions};
use crate::page::Page;
use crate::ripple::ClickPoint;
use crate::scheduler::{Scheduler, Task, TimerId};
use crate::store::KeyValueStore;

type BrowserPage = Page<BrowserDom, BrowserStore, BrowserScheduler, BrowserObserver>;

thread_local! {
    static PAGE: RefCell<Option<Rc<RefCell<BrowserPage>>>> = const { RefCell::new(None) };
}

/// Log a failed DOM call and carry on.
fn check<T>(what: &str, result: Result<T, JsValue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::debug!("{what} failed: {}", BindError::from(err));
            None
        }
    }
}

// =============================================================
// Page sink
// =============================================================

/// Weak route from browser callbacks back into the page.
#[derive(Clone, Default)]
struct PageSink(Rc<RefCell<Weak<RefCell<BrowserPage>>>>);

impl PageSink {
    fn attach(&self, page: &Rc<RefCell<BrowserPage>>) {
        *self.0.borrow_mut() = Rc::downgrade(page);
    }

    fn dispatch(&self, f: impl FnOnce(&mut BrowserPage)) {
        let Some(page) = self.0.borrow().upgrade() else {
            return;
        };
        let Ok(mut page) = page.try_borrow_mut() else {
            log::debug!("web: page busy, dropping event");
            return;
        };
        f(&mut page);
    }
}

// =============================================================
// Element arena
// =============================================================

/// Interns browser elements behind stable [`ElementId`] handles.
///
/// Slots are released when the element is removed through [`Dom::remove`]
/// and handed out again to the next new element.
#[derive(Clone, Default)]
struct Arena(Rc<RefCell<Slots>>);

#[derive(Default)]
struct Slots {
    nodes: Vec<Option<Element>>,
    free: Vec<usize>,
}

impl Arena {
    fn intern(&self, element: Element) -> ElementId {
        let mut slots = self.0.borrow_mut();
        let known = slots
            .nodes
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|known| known.is_same_node(Some(element.as_ref()))));
        if let Some(index) = known {
            return ElementId(index);
        }
        if let Some(index) = slots.free.pop() {
            slots.nodes[index] = Some(element);
            return ElementId(index);
        }
        slots.nodes.push(Some(element));
        ElementId(slots.nodes.len() - 1)
    }

    fn get(&self, id: ElementId) -> Option<Element> {
        self.0.borrow().nodes.get(id.0).cloned().flatten()
    }

    /// Release `root` and every interned element inside it.
    fn release(&self, root: &Element) {
        let mut slots = self.0.borrow_mut();
        let Slots { nodes, free } = &mut *slots;
        for (index, slot) in nodes.iter_mut().enumerate() {
            if slot.as_ref().is_some_and(|element| root.contains(Some(element.as_ref()))) {
                *slot = None;
                free.push(index);
            }
        }
    }

    fn html(&self, id: ElementId) -> Option<HtmlElement> {
        match self.get(id)?.dyn_into::<HtmlElement>() {
            Ok(element) => Some(element),
            Err(_) => None,
        }
    }
}

// =============================================================
// Capabilities
// =============================================================

pub struct BrowserDom {
    window: Window,
    document: Document,
    arena: Arena,
}

impl Dom for BrowserDom {
    fn body(&mut self) -> Option<ElementId> {
        let body = self.document.body()?;
        Some(self.arena.intern(body.into()))
    }

    fn query(&mut self, selector: &Selector<'_>) -> Vec<ElementId> {
        if let Selector::Id(id) = selector {
            return self.document.get_element_by_id(id).map(|el| self.arena.intern(el)).into_iter().collect();
        }
        let Some(list) = check("querySelectorAll", self.document.query_selector_all(&selector.to_css())) else {
            return Vec::new();
        };
        let mut found = Vec::new();
        for index in 0..list.length() {
            if let Some(Ok(element)) = list.item(index).map(|node| node.dyn_into::<Element>()) {
                found.push(self.arena.intern(element));
            }
        }
        found
    }

    fn create(&mut self, tag: &str) -> Option<ElementId> {
        let element = check("createElement", self.document.create_element(tag))?;
        Some(self.arena.intern(element))
    }

    fn append(&mut self, parent: ElementId, child: ElementId) {
        if let (Some(parent), Some(child)) = (self.arena.get(parent), self.arena.get(child)) {
            check("appendChild", parent.append_child(&child));
        }
    }

    fn remove(&mut self, element: ElementId) {
        if let Some(element) = self.arena.get(element) {
            element.remove();
            self.arena.release(&element);
        }
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(element) = self.arena.get(element) {
            check("classList.add", element.class_list().add_1(class));
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(element) = self.arena.get(element) {
            check("classList.remove", element.class_list().remove_1(class));
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.arena.get(element).is_some_and(|el| el.class_list().contains(class))
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.arena.get(element)?.get_attribute(name)
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(element) = self.arena.get(element) {
            check("setAttribute", element.set_attribute(name, value));
        }
    }

    fn text(&self, element: ElementId) -> String {
        self.arena.get(element).and_then(|el| el.text_content()).unwrap_or_default()
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(element) = self.arena.get(element) {
            element.set_text_content(Some(text));
        }
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        if let Some(element) = self.arena.html(element) {
            check("style.setProperty", element.style().set_property(property, value));
        }
    }

    fn client_size(&self, element: ElementId) -> (f64, f64) {
        self.arena
            .get(element)
            .map_or((0.0, 0.0), |el| (f64::from(el.client_width()), f64::from(el.client_height())))
    }

    fn offset_position(&self, element: ElementId) -> (f64, f64) {
        self.arena
            .html(element)
            .map_or((0.0, 0.0), |el| (f64::from(el.offset_left()), f64::from(el.offset_top())))
    }

    fn children_with_class(&mut self, element: ElementId, class: &str) -> Vec<ElementId> {
        let Some(element) = self.arena.get(element) else {
            return Vec::new();
        };
        let children = element.children();
        let mut found = Vec::new();
        for index in 0..children.length() {
            if let Some(child) = children.item(index) {
                if child.class_list().contains(class) {
                    found.push(self.arena.intern(child));
                }
            }
        }
        found
    }

    fn scroll_into_view(&mut self, element: ElementId) {
        let Some(element) = self.arena.get(element) else {
            return;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn scroll_to_top(&mut self) {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

/// `localStorage`; inert when storage is unavailable (private mode, sandboxing).
pub struct BrowserStore {
    storage: Option<Storage>,
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        check("localStorage.getItem", self.storage.as_ref()?.get_item(key)).flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            check("localStorage.setItem", storage.set_item(key, value));
        }
    }
}

/// `gloo-timers` scheduler dispatching fired tasks into the page.
pub struct BrowserScheduler {
    sink: PageSink,
    next_id: u64,
    intervals: HashMap<TimerId, Interval>,
    cancelled: Rc<RefCell<HashSet<TimerId>>>,
}

impl BrowserScheduler {
    fn next_id(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Scheduler for BrowserScheduler {
    fn after(&mut self, delay_ms: u32, task: Task) -> TimerId {
        let id = self.next_id();
        let sink = self.sink.clone();
        let cancelled = Rc::clone(&self.cancelled);
        Timeout::new(delay_ms, move || {
            if cancelled.borrow_mut().remove(&id) {
                return;
            }
            sink.dispatch(|page| page.run_task(id, task));
        })
        .forget();
        id
    }

    fn every(&mut self, interval_ms: u32, task: Task) -> TimerId {
        let id = self.next_id();
        let sink = self.sink.clone();
        let interval = Interval::new(interval_ms.max(1), move || {
            sink.dispatch(|page| page.run_task(id, task.clone()));
        });
        self.intervals.insert(id, interval);
        id
    }

    fn clear(&mut self, id: TimerId) {
        match self.intervals.remove(&id) {
            // Usually called from inside the interval's own callback, so the
            // closure must outlive this frame.
            Some(interval) => {
                let callback = interval.cancel();
                Timeout::new(0, move || drop(callback)).forget();
            }
            None => {
                self.cancelled.borrow_mut().insert(id);
            }
        }
    }
}

type EntriesCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// One `IntersectionObserver` per [`Watch`], created on first use.
pub struct BrowserObserver {
    sink: PageSink,
    arena: Arena,
    observers: HashMap<Watch, (IntersectionObserver, EntriesCallback)>,
}

impl BrowserObserver {
    fn observer_for(&mut self, watch: Watch, options: &WatchOptions) -> Option<&IntersectionObserver> {
        if !self.observers.contains_key(&watch) {
            let sink = self.sink.clone();
            let arena = self.arena.clone();
            let callback: EntriesCallback = Closure::new(move |entries: js_sys::Array, _: IntersectionObserver| {
                let mut batch = Vec::new();
                for value in entries.iter() {
                    if let Ok(entry) = value.dyn_into::<IntersectionObserverEntry>() {
                        batch.push(IntersectionEntry {
                            target: arena.intern(entry.target()),
                            entered: entry.is_intersecting(),
                        });
                    }
                }
                sink.dispatch(|page| page.on_intersection(watch, batch));
            });
            let init = IntersectionObserverInit::new();
            init.set_threshold(&JsValue::from_f64(options.threshold));
            init.set_root_margin(&options.root_margin);
            let observer = check(
                "new IntersectionObserver",
                IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init),
            )?;
            self.observers.insert(watch, (observer, callback));
        }
        self.observers.get(&watch).map(|(observer, _)| observer)
    }
}

impl Observer for BrowserObserver {
    fn observe(&mut self, watch: Watch, options: &WatchOptions, target: ElementId) -> bool {
        let Some(element) = self.arena.get(target) else {
            return false;
        };
        let Some(observer) = self.observer_for(watch, options) else {
            return false;
        };
        observer.observe(&element);
        true
    }

    fn unobserve(&mut self, watch: Watch, target: ElementId) {
        if let (Some(element), Some((observer, _))) = (self.arena.get(target), self.observers.get(&watch)) {
            observer.unobserve(&element);
        }
    }
}

// =============================================================
// Entry point
// =============================================================

/// WASM entry point: boot now, or once the document finishes parsing.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.ready_state() != "loading" {
        report(boot());
        return;
    }
    let on_ready = Closure::once_into_js(move || report(boot()));
    check(
        "addEventListener(DOMContentLoaded)",
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref()),
    );
}

fn report(result: Result<(), BindError>) {
    if let Err(err) = result {
        log::warn!("portfolio: not initialized: {err}");
    }
}

/// Read the page config from the body, then start console logging at its level.
fn load_config(body: &HtmlElement) -> PageConfig {
    let parsed = body.get_attribute(consts::CONFIG_ATTRIBUTE).map(|raw| PageConfig::from_json(&raw));
    let config = match &parsed {
        Some(Ok(config)) => config.clone(),
        _ => PageConfig::default(),
    };
    let level = config.level_filter().unwrap_or(log::LevelFilter::Info);
    if let Some(level) = level.to_level() {
        if let Err(err) = console_log::init_with_level(level) {
            web_sys::console::warn_1(&JsValue::from_str(&format!("portfolio: logger: {err}")));
        }
    }
    if let Some(Err(err)) = parsed {
        log::warn!("portfolio: using default config: {err}");
    }
    config
}

fn boot() -> Result<(), BindError> {
    let window = web_sys::window().ok_or(BindError::MissingWindow)?;
    let document = window.document().ok_or(BindError::MissingDocument)?;
    let body = document.body().ok_or(BindError::MissingBody)?;
    let config = load_config(&body);

    let sink = PageSink::default();
    let arena = Arena::default();
    let page = Page::new(
        BrowserDom { window: window.clone(), document, arena: arena.clone() },
        BrowserStore { storage: check("localStorage", window.local_storage()).flatten() },
        BrowserScheduler {
            sink: sink.clone(),
            next_id: 0,
            intervals: HashMap::new(),
            cancelled: Rc::default(),
        },
        BrowserObserver { sink: sink.clone(), arena: arena.clone(), observers: HashMap::new() },
        config,
    );
    let page = Rc::new(RefCell::new(page));
    sink.attach(&page);
    PAGE.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&page)));

    let targets = page.borrow_mut().init();
    for id in targets {
        if let Some(element) = arena.get(id) {
            listen_click(&element, id, &sink)?;
        }
    }
    listen_scroll(&window, &sink)?;
    listen_color_scheme(&window, &sink)?;
    Ok(())
}

fn listen_click(element: &Element, id: ElementId, sink: &PageSink) -> Result<(), BindError> {
    let sink = sink.clone();
    let handler = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let click = ClickPoint { client_x: f64::from(event.client_x()), client_y: f64::from(event.client_y()) };
        let mut prevent = false;
        sink.dispatch(|page| prevent = page.on_click(id, click).prevent_default);
        if prevent {
            event.prevent_default();
        }
    });
    element.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

fn listen_scroll(window: &Window, sink: &PageSink) -> Result<(), BindError> {
    let sink = sink.clone();
    let reader = window.clone();
    let handler = Closure::<dyn FnMut()>::new(move || {
        if let Some(offset) = check("scrollY", reader.scroll_y()) {
            sink.dispatch(|page| page.on_scroll(offset));
        }
    });
    window.add_event_listener_with_callback("scroll", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

fn listen_color_scheme(window: &Window, sink: &PageSink) -> Result<(), BindError> {
    let Some(query) = window.match_media(consts::PREFERS_DARK_QUERY)? else {
        return Ok(());
    };
    let sink = sink.clone();
    let handler = Closure::<dyn FnMut(MediaQueryListEvent)>::new(move |event: MediaQueryListEvent| {
        sink.dispatch(|page| page.on_system_scheme_change(event.matches()));
    });
    query.add_event_listener_with_callback("change", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}
