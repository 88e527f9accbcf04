mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{is_valid_key, ENTRIES_KEY};
pub use serialization::{deserialize_entries, serialize_entries, SerializationError};
pub use traits::Cache;
