// 公开导出的模块，供外部使用
pub mod models;
pub mod formatters;
pub mod render;
pub mod errors;
pub mod services;
pub mod transport;
pub mod config;

#[doc(hidden)]
pub mod util;

// 重新导出常用类型，方便使用
pub use models::category::{Granularity, Period, QueryCategory};
pub use models::envelope::ResponseEnvelope;
pub use formatters::{build_view, format, format_text, format_date, format_number, format_volume, FormatOptions, View};
pub use services::{DisplaySink, DisplayState, QueryOutcome, QueryService};
pub use transport::{HttpTransport, QueryForm, QueryTransport};
pub use config::Config;
pub use errors::{Result, StockDeskError};
