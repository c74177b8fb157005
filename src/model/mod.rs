mod logistic;
mod types;

pub use logistic::LogisticAdapter;
pub use types::*;

/// A trained classifier the prediction endpoint delegates scoring to.
///
/// Implementations are read-only after construction and are shared between
/// concurrent requests, so `predict` must not rely on interior mutation.
pub trait ModelAdapter: Send + Sync {
    /// Version identifier reported with every response, whether or not
    /// scoring succeeds.
    fn version(&self) -> &str;

    /// Fields every input record is validated against.
    fn schema(&self) -> &[FieldSpec];

    /// Labels `predict` may emit.
    fn class_labels(&self) -> &[i64];

    /// Score a batch, returning one label per record in input order.
    fn predict(&self, records: &[Record]) -> std::result::Result<Vec<i64>, Fault>;
}
