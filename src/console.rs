//! Browser console logging.
//!
//! The macros only emit on `wasm32`; native builds (and `cargo test`) compile
//! the arguments but never call into `web_sys`, which would panic off-wasm.

/// Log an info line to the browser console.
#[macro_export]
macro_rules! console_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(&format!($($arg)*)));
        #[cfg(not(target_arch = "wasm32"))]
        let _ = || format!($($arg)*);
    }};
}

/// Log a warning to the browser console.
#[macro_export]
macro_rules! console_warn {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(&format!($($arg)*)));
        #[cfg(not(target_arch = "wasm32"))]
        let _ = || format!($($arg)*);
    }};
}
