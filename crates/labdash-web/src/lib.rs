#![forbid(unsafe_code)]

//! Browser entry point for the IDS Lab Commander dashboard.
//!
//! On `wasm32` this crate wires a [`labdash_core::Dashboard`] to the live
//! document:
//! - `BrowserPage` implements the core page traits over `web-sys`, with
//!   htmx and mermaid feature-detected on `window`,
//! - the clipboard goes through `navigator.clipboard`,
//! - `tracing` output lands in the browser console,
//! - the functions the server markup calls (`showTab`, `copyCode`,
//!   `showToast`, ...) are exported with `wasm-bindgen`.
//!
//! [`bootstrap`] and [`selectors`] hold the target-independent parts and
//! build natively, so `cargo test --workspace` covers them.

pub mod bootstrap;
pub mod selectors;

#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(target_arch = "wasm32")]
mod clipboard;
#[cfg(target_arch = "wasm32")]
mod logging;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserPage;
#[cfg(target_arch = "wasm32")]
pub use clipboard::BrowserClipboard;
