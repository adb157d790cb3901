pub mod cache;
pub mod config;
pub mod error;
pub mod profile_refresh;
pub mod steam_api;
pub mod steam_id;
pub mod update_gate;
pub mod xml_document;

#[cfg(test)]
mod tests;

pub use cache::{CacheError, Clock, MemoryProfileCache, ProfileCache, SystemClock};
pub use config::SteamConfig;
pub use error::{ErrorPayload, SteamError};
pub use profile_refresh::{ProfileRefresher, RefreshedProfile};
pub use steam_api::{FetchKind, FetchRequest, Payload, ResponseFormat, SteamApiClient};
pub use steam_id::{to_full_id, to_legacy_id, to_small_id, FullId, LegacyId, SmallId, BASE_OFFSET};
pub use update_gate::UpdateGate;
pub use xml_document::XmlElement;
