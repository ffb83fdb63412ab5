mod dom;
mod fetch;

pub use dom::{performance_now, pointer_position};
pub use fetch::{describe_js_error, fetch_text};
