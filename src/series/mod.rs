pub mod aggregate;
pub mod bucket;
pub mod correlate;
pub mod metrics;

pub use aggregate::aggregate;
pub use bucket::{bucket_key, generate_buckets, truncate};
pub use correlate::synchronicity;
pub use metrics::{average_magnitude, chaos_ratio};
