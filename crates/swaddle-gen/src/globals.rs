//! Identifiers the host environment supplies to every script.
//!
//! A body may reference these without declaring them; they are never factory
//! parameters.

use phf::{Set, phf_set};

static HOST_GLOBALS: Set<&'static str> = phf_set! {
    // ECMAScript
    "AggregateError",
    "Array",
    "ArrayBuffer",
    "Atomics",
    "BigInt",
    "BigInt64Array",
    "BigUint64Array",
    "Boolean",
    "DataView",
    "Date",
    "Error",
    "EvalError",
    "FinalizationRegistry",
    "Float32Array",
    "Float64Array",
    "Function",
    "Infinity",
    "Int16Array",
    "Int32Array",
    "Int8Array",
    "Intl",
    "JSON",
    "Map",
    "Math",
    "NaN",
    "Number",
    "Object",
    "Promise",
    "Proxy",
    "RangeError",
    "ReferenceError",
    "Reflect",
    "RegExp",
    "Set",
    "SharedArrayBuffer",
    "String",
    "Symbol",
    "SyntaxError",
    "TypeError",
    "URIError",
    "Uint16Array",
    "Uint32Array",
    "Uint8Array",
    "Uint8ClampedArray",
    "WeakMap",
    "WeakRef",
    "WeakSet",
    "arguments",
    "decodeURI",
    "decodeURIComponent",
    "encodeURI",
    "encodeURIComponent",
    "escape",
    "eval",
    "globalThis",
    "isFinite",
    "isNaN",
    "parseFloat",
    "parseInt",
    "undefined",
    "unescape",
    // Browsers and workers
    "AbortController",
    "AbortSignal",
    "Blob",
    "CustomEvent",
    "Element",
    "Event",
    "EventTarget",
    "File",
    "FormData",
    "HTMLElement",
    "Headers",
    "IntersectionObserver",
    "MutationObserver",
    "Node",
    "Request",
    "ResizeObserver",
    "Response",
    "TextDecoder",
    "TextEncoder",
    "URL",
    "URLSearchParams",
    "WebSocket",
    "Worker",
    "XMLHttpRequest",
    "alert",
    "atob",
    "btoa",
    "cancelAnimationFrame",
    "clearInterval",
    "clearTimeout",
    "confirm",
    "console",
    "crypto",
    "document",
    "fetch",
    "getComputedStyle",
    "history",
    "localStorage",
    "location",
    "navigator",
    "performance",
    "prompt",
    "queueMicrotask",
    "requestAnimationFrame",
    "self",
    "sessionStorage",
    "setInterval",
    "setTimeout",
    "structuredClone",
    "window",
    // Node.js
    "Buffer",
    "__dirname",
    "__filename",
    "clearImmediate",
    "exports",
    "global",
    "module",
    "process",
    "require",
    "setImmediate",
};

/// Whether `name` is supplied by the host environment
pub fn is_host_global(name: &str) -> bool {
    HOST_GLOBALS.contains(name)
}
