//! Data-transfer helpers for lazydto.
//! Synced dual-representation containers and paged views live here.

pub mod codec;
pub mod column;
pub mod container;
pub mod logging;
pub mod paging;

pub use codec::{Codec, CodecError, CodecResult, JsonCodec};
pub use container::{
    Adapters, CacheState, ContainerError, ContainerResult, SyncedList, SyncedMap, SyncedObject,
    SyncedValue,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use paging::{Comparer, PageInfo, PagedList, PagingError, PagingResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
