/// Recall system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// BM25 term-frequency saturation parameter. Fixed Okapi constant.
pub const BM25_K1: f64 = 1.5;

/// BM25 document-length normalization parameter. Fixed Okapi constant.
pub const BM25_B: f64 = 0.75;
