//! WASM entry points for the browser host.
//!
//! This module is only compiled for the `wasm32` target. JavaScript creates
//! one window context per window instance and routes JSON messages to it.

use std::cell::RefCell;
use std::collections::HashMap;

use bom_format::BomDocument;
use uuid::Uuid;
use wasm_bindgen::prelude::*;

use crate::context::WindowContext;
use crate::dispatch::{dispatch, HostServices};
use crate::host::{ComponentHost, HostError};
use crate::messages::{EngineToHost, HostToEngine};

// Single-threaded in the browser.
thread_local! {
    static ENGINE: RefCell<Option<WasmEngine>> = const { RefCell::new(None) };
}

struct WasmEngine {
    windows: HashMap<Uuid, WindowContext>,
    host: Option<JsComponentHost>,
}

/// Forwards the flat BOM sink to a JavaScript part generator.
struct JsComponentHost {
    callback: js_sys::Function,
}

impl ComponentHost for JsComponentHost {
    fn generate_parts(&mut self, document: &BomDocument) -> Result<(), HostError> {
        let sink = document.to_sink_json().map_err(|e| HostError::Rejected {
            reason: e.to_string(),
        })?;
        self.callback
            .call1(&JsValue::NULL, &JsValue::from_str(&sink))
            .map(|_| ())
            .map_err(|e| HostError::Rejected {
                reason: format!("{e:?}"),
            })
    }
}

/// Initialize the engine. Must be called once before any other function.
#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();

    ENGINE.with(|cell| {
        *cell.borrow_mut() = Some(WasmEngine {
            windows: HashMap::new(),
            host: None,
        });
    });
    web_sys::console::debug_1(&JsValue::from_str("window engine initialized"));
}

/// Create a window context and return its id.
#[wasm_bindgen]
pub fn create_window() -> Option<String> {
    ENGINE.with(|cell| {
        let mut engine = cell.borrow_mut();
        let engine = engine.as_mut()?;
        let ctx = WindowContext::new();
        let id = ctx.id;
        engine.windows.insert(id, ctx);
        Some(id.to_string())
    })
}

/// Drop a window context. Returns whether it existed.
#[wasm_bindgen]
pub fn dispose_window(window_id: &str) -> bool {
    let Ok(id) = Uuid::parse_str(window_id) else {
        return false;
    };
    ENGINE.with(|cell| {
        cell.borrow_mut()
            .as_mut()
            .is_some_and(|engine| engine.windows.remove(&id).is_some())
    })
}

/// Register the function that turns a BOM sink array into parts. It receives
/// the sink as a JSON string.
#[wasm_bindgen]
pub fn register_component_host(callback: js_sys::Function) {
    ENGINE.with(|cell| {
        if let Some(engine) = cell.borrow_mut().as_mut() {
            engine.host = Some(JsComponentHost { callback });
        }
    });
}

/// Process a JSON `HostToEngine` message for one window and return a JSON
/// `EngineToHost` response.
#[wasm_bindgen]
pub fn process_message(window_id: &str, json_input: &str) -> String {
    let response = ENGINE.with(|cell| {
        let mut engine = cell.borrow_mut();
        let Some(engine) = engine.as_mut() else {
            return error("engine not initialized, call init() first".to_string());
        };

        let msg: HostToEngine = match serde_json::from_str(json_input) {
            Ok(msg) => msg,
            Err(e) => return error(format!("Failed to parse message: {e}")),
        };

        let ctx = Uuid::parse_str(window_id)
            .ok()
            .and_then(|id| engine.windows.get_mut(&id));
        let Some(ctx) = ctx else {
            return error(format!("unknown window: {window_id}"));
        };

        let mut services = HostServices {
            provider: None,
            host: engine
                .host
                .as_mut()
                .map(|h| h as &mut dyn ComponentHost),
        };
        dispatch(ctx, msg, &mut services)
    });

    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(r#"{{"type":"Error","message":"Serialization failed: {e}"}}"#)
    })
}

fn error(message: String) -> EngineToHost {
    EngineToHost::Error { message }
}
