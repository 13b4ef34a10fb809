pub mod base;
pub mod http;

pub use base::{QueryForm, QueryTransport, EMPTY_SYMBOL_MESSAGE};
pub use http::HttpTransport;
