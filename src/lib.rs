//! Tsunagu Core: Incident Field Extraction + Staff Reconciliation
//!
//! A Rust/WASM engine for first responders working offline: turn an
//! emergency notice or a scanned code into structured fields, match the
//! casualty against the staff directory, and present the merged record.
//!
//! # Architecture
//!
//! ## Extraction
//! - `extract/normalize.rs` - Script folding (katakana -> hiragana, whitespace removal)
//! - `extract/message.rs` - MessageCortex: Labeled notice fields via Aho-Corasick
//! - `extract/payload.rs` - PayloadCortex: Ordered strategies for person/location codes
//!
//! ## Directory
//! - `directory/record.rs` - PersonRecord (staff + medical profile)
//! - `directory/matcher.rs` - Exact id lookup, name/phonetic search
//!
//! ## Map
//! - `spatial/region.rs` - Zones and places as polygons
//! - `spatial/catalog.rs` - The fixed site map
//! - `spatial/resolver.rs` - Selection -> location label
//!
//! ## Session
//! - `session/reconcile.rs` - ReconciliationSession: report + person linkage
//! - `session/scan.rs` - ScanGate: single live decode session
//! - `session/view.rs` - Display rows for the merged record
//!
//! ## Facade
//! - `engine.rs` - ReconcileEngine: the single WASM entry point
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { ReconcileEngine } from 'tsunagu-core';
//!
//! await init();
//!
//! const engine = new ReconcileEngine({ placeholder: '不明', zoneLabelPrefix: 'エリア', zoneLabelSeparator: '' });
//! engine.hydrateDirectory(staff);
//!
//! const { outcome, notice } = engine.startFromMessage(
//!   "連絡時間: 12:00\n職員ID: S001\n場所: A棟",
//!   undefined
//! );
//!
//! engine.selectRegion('place-canteen');
//! engine.applyRegion();
//!
//! if (engine.commit()) {
//!   render(engine.showcase());
//! }
//! ```

pub mod config;
pub mod console;
pub mod directory;
pub mod engine;
pub mod extract;
pub mod session;
pub mod spatial;
pub mod types;

pub use config::*;
pub use directory::*;
pub use engine::*;
pub use extract::*;
pub use session::*;
pub use spatial::*;
pub use types::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("tsunagu-core v{}", env!("CARGO_PKG_VERSION"))
}
