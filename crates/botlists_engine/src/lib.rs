//! Botlists engine: list fetching, link resolution, caching and aggregation.
mod aggregate;
mod config;
mod export;
mod members;
mod normalize;
mod resolve;
mod store;
mod twitter;
mod types;

pub use aggregate::Aggregator;
pub use config::{ConfigError, EngineConfig};
pub use export::{export_profiles, ExportError, ExportOptions, ExportSummary};
pub use members::MemoizedMembers;
pub use normalize::Normalizer;
pub use resolve::{LinkResolver, ReqwestLinkResolver, ResolveSettings};
pub use store::{ensure_store_dir, AtomicFileWriter, DiskStore, StoreError};
pub use twitter::{ListMembersApi, MembersQuery, TwitterClient, DEFAULT_API_BASE_URL};
pub use types::{AggregateError, ApiError, FailureKind, MembersError, ResolveError};
