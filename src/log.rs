// Browser console logging. Host builds (native `cargo test`) cannot call JS
// imports, so the sink is a no-op off wasm32.

/// `format!`-style line to the browser console.
macro_rules! clog {
    ($($arg:tt)*) => {
        $crate::log::console_line(&format!($($arg)*))
    };
}
pub(crate) use clog;

#[cfg(target_arch = "wasm32")]
pub(crate) fn console_line(msg: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(msg));
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn console_line(_msg: &str) {}
