//! Error types for the `simul-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias.

use simul_types::{CountryId, RegionId};

/// Errors that can occur during entity-store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// No country with this id exists in the world.
    #[error("country not found: {0}")]
    CountryNotFound(CountryId),

    /// No region with this id exists in the world.
    #[error("region not found: {0}")]
    RegionNotFound(RegionId),

    /// The region is not a member of the country it was removed from.
    #[error("region {region} is not owned by country {country}")]
    RegionNotOwned {
        /// The region.
        region: RegionId,
        /// The country that was expected to own it.
        country: CountryId,
    },

    /// A country was named on both sides of a relation.
    #[error("country {0} cannot hold a relation with itself")]
    SelfRelation(CountryId),

    /// All `u32` identifiers of an entity kind have been handed out.
    #[error("identifier space exhausted for {kind}")]
    IdSpaceExhausted {
        /// The entity kind (`"country"` or `"region"`).
        kind: &'static str,
    },
}
