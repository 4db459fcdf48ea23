//! `estab-core` — foundational types for the `estab` establishment engine.
//!
//! This crate is a dependency of every other `estab-*` crate.  It has no
//! `estab-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `SpeciesId`, `RegionId`, `SiteId`                     |
//! | [`time`]        | `Year`, `SimClock`, `SimConfig`                       |
//! | [`params`]      | `EstablishParams` (terrain-adjustment constants)      |
//! | [`rng`]         | `SimRng` (seeded, reproducible)                       |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod params;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{RegionId, SiteId, SpeciesId};
pub use params::EstablishParams;
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Year};
