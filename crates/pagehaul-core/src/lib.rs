pub mod config;
pub mod logging;

// Discovery pipeline, producer to consumer order.
pub mod candidate;
pub mod dispatch;
pub mod estimate;
pub mod merge;
pub mod observe;
pub mod scan;
pub mod select;
pub mod session;
pub mod strategy;
pub mod url_meta;
pub mod view;
