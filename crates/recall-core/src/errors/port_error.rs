/// External port failures.
///
/// Every variant means the same thing to the retrieval pipeline: that
/// engine contributes nothing this query. Timeouts are enforced by port
/// implementations, which own their own deadline budget.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("port unavailable: {port}")]
    Unavailable { port: String },

    #[error("port {port} exceeded its {budget_ms}ms budget")]
    Timeout { port: String, budget_ms: u64 },

    #[error("port {port} backend error: {message}")]
    Backend { port: String, message: String },
}
