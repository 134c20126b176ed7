//! Standard Bloom Filter implementation
pub mod bits;
pub mod config;
pub mod error;
pub mod filter;
pub mod key;
pub mod snapshot;
pub mod traits;

pub use config::{BloomFilterConfig, BloomFilterConfigBuilder, BloomParams};
pub use error::{BloomError, BloomResult};
pub use filter::BloomFilter;
pub use key::BloomKey;
pub use snapshot::HEADER_LEN;
pub use traits::{BloomFilterOps, BloomFilterStats, BulkBloomFilterOps};
