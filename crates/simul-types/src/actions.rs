//! Deferred commands submitted by external callers.
//!
//! An [`Action`] is queued on the world and applied by the simulator after
//! the rule pass of the next tick. Actions carry only ids and values; they
//! have no identity of their own and are consumed exactly once.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{CountryId, RegionId};

/// A command that mutates the world between rule passes.
///
/// The variant set is closed: diplomacy between two countries, tax rate
/// changes for a country, and the labor split of a region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Action {
    /// `actor` and `other` enter a mutual state of war.
    DeclareWar {
        /// The declaring country.
        actor: CountryId,
        /// The country war is declared on.
        other: CountryId,
    },
    /// `actor` offers peace to `other`; accepted on the following tick.
    ProposePeace {
        /// The proposing country.
        actor: CountryId,
        /// The country receiving the proposal.
        other: CountryId,
    },
    /// `actor` accepts peace with `other`, ending the war between them.
    AcceptPeace {
        /// The accepting country.
        actor: CountryId,
        /// The country that proposed peace.
        other: CountryId,
    },
    /// Overwrite a country's agriculture tax rate.
    SetTaxAgriculture {
        /// The taxing country.
        country: CountryId,
        /// New rate, conventionally in `0.0..=1.0`.
        rate: f64,
    },
    /// Overwrite a country's manufacture tax rate.
    SetTaxManufacture {
        /// The taxing country.
        country: CountryId,
        /// New rate, conventionally in `0.0..=1.0`.
        rate: f64,
    },
    /// Overwrite the share of a region's labor that works agriculture.
    SetAgricultureRatio {
        /// The region to adjust.
        region: RegionId,
        /// New ratio, conventionally in `0.0..=1.0`.
        ratio: f64,
    },
}

impl Action {
    /// Short stable name of the variant, used in log fields.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DeclareWar { .. } => "declare_war",
            Self::ProposePeace { .. } => "propose_peace",
            Self::AcceptPeace { .. } => "accept_peace",
            Self::SetTaxAgriculture { .. } => "set_tax_agriculture",
            Self::SetTaxManufacture { .. } => "set_tax_manufacture",
            Self::SetAgricultureRatio { .. } => "set_agriculture_ratio",
        }
    }

    /// Every country the action refers to.
    pub fn countries(&self) -> Vec<CountryId> {
        match *self {
            Self::DeclareWar { actor, other }
            | Self::ProposePeace { actor, other }
            | Self::AcceptPeace { actor, other } => vec![actor, other],
            Self::SetTaxAgriculture { country, .. } | Self::SetTaxManufacture { country, .. } => {
                vec![country]
            }
            Self::SetAgricultureRatio { .. } => Vec::new(),
        }
    }

    /// The region the action refers to, if any.
    pub const fn region(&self) -> Option<RegionId> {
        match *self {
            Self::SetAgricultureRatio { region, .. } => Some(region),
            _ => None,
        }
    }
}
