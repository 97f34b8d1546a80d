//! Page-interaction layer for a static portfolio site.
//!
//! This crate is compiled to WebAssembly and loaded by the static page once
//! its structure is ready. It owns every interactive affordance on the page:
//! theme switching, smooth in-page navigation, reveal-on-scroll sections,
//! counting stats, click ripples, contact-card feedback and the scroll-to-top
//! control. All behaviour lives in browser-independent modules driven through
//! small capability traits; the [`web`] module (feature `hydrate`) binds those
//! traits to `web-sys` and installs the event listeners.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`page`] | Top-level [`page::Page`]: owns capabilities, dispatches events |
//! | [`theme`] | Light/dark preference, toggle control, OS scheme fallback |
//! | [`smooth_scroll`] | Same-page fragment links |
//! | [`reveal`] | Fade-in of `.section` elements on first intersection |
//! | [`counter`] | Counting animation for `.stat-number` elements |
//! | [`ripple`] | Click ripple overlays |
//! | [`scroll_top`] | Floating scroll-to-top control |
//! | [`contact`] | Transient `clicked` marker on contact cards |
//! | [`typing`] | Optional typing effect on the hero heading |
//! | [`dom`] | Element-tree capability and the in-memory [`dom::MemoryDom`] |
//! | [`store`] | Key-value preference storage |
//! | [`scheduler`] | Timer capability and the deterministic [`scheduler::ManualScheduler`] |
//! | [`observer`] | Viewport-intersection capability |
//! | [`config`] | Runtime configuration read from the page |
//! | [`consts`] | Class names, element ids and default timings |

pub mod config;
pub mod consts;
pub mod contact;
pub mod counter;
pub mod dom;
pub mod error;
pub mod observer;
pub mod page;
pub mod reveal;
pub mod ripple;
pub mod scheduler;
pub mod scroll_top;
pub mod smooth_scroll;
pub mod store;
pub mod theme;
pub mod typing;

#[cfg(feature = "hydrate")]
pub mod web;
