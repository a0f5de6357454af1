/// The unique identifier for an object in a dataset.
///
/// OIDs are opaque, totally ordered and never reused within a session; they
/// are produced by whatever loads the dataset, not by this crate.
pub type Oid = u64;

/// The coordinate representation of a stored object.
pub type Vector = Vec<f64>;
