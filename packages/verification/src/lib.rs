#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Vote ledger and verification status for crowd-submitted incidents.
//!
//! Every incident carries a [`VerificationLedger`]. Community members
//! either confirm or flag a report, at most once each, and the
//! [`VerificationStatus`] is re-derived from the two counters after every
//! accepted vote. Only a unanimous signal moves the status away from
//! [`VerificationStatus::Unverified`]:
//!
//! | confirmations | flags | status       |
//! |---------------|-------|--------------|
//! | `>= 3`        | `0`   | `verified`   |
//! | `0`           | `>= 2`| `suspicious` |
//! | anything else |       | `unverified` |
//!
//! The ledger itself is not synchronized. Callers that share it across
//! tasks must serialize [`VerificationLedger::record`] per incident.

use std::collections::BTreeSet;

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

/// Confirmations needed (with zero flags) for an incident to be verified.
pub const VERIFIED_MIN_CONFIRMATIONS: u32 = 3;

/// Flags needed (with zero confirmations) for an incident to be suspicious.
pub const SUSPICIOUS_MIN_FLAGS: u32 = 2;

/// Derived trust classification of an incident report.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VerificationStatus {
    /// No unanimous signal yet (the initial state).
    #[default]
    Unverified,
    /// Enough confirmations and no flags.
    Verified,
    /// Enough flags and no confirmations.
    Suspicious,
}

impl VerificationStatus {
    /// Derives the status from the vote counters.
    ///
    /// Once both counters are non-zero the result is always
    /// [`Self::Unverified`], whatever their magnitudes.
    #[must_use]
    pub const fn derive(confirmations: u32, flags: u32) -> Self {
        if confirmations >= VERIFIED_MIN_CONFIRMATIONS && flags == 0 {
            Self::Verified
        } else if flags >= SUSPICIOUS_MIN_FLAGS && confirmations == 0 {
            Self::Suspicious
        } else {
            Self::Unverified
        }
    }
}

/// What a voter is asserting about a report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VoteAction {
    /// The voter vouches for the report.
    Confirm,
    /// The voter believes the report is wrong or malicious.
    Flag,
}

/// Result of submitting a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum VoteStatus {
    /// The voter had already voted on this incident; nothing changed.
    AlreadyVoted,
    /// The vote was appended and the status recomputed.
    Recorded,
}

/// Per-incident vote ledger.
///
/// Fields are private so the invariants hold: a voter id sits in at most
/// one voter set, each counter equals its voter set's size, counters never
/// decrease, and the status is always [`VerificationStatus::derive`] of
/// the counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationLedger {
    confirmations: u32,
    flags: u32,
    confirm_voters: BTreeSet<String>,
    flag_voters: BTreeSet<String>,
    verification_status: VerificationStatus,
}

impl VerificationLedger {
    /// Creates an empty, unverified ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accepted confirmations.
    #[must_use]
    pub const fn confirmations(&self) -> u32 {
        self.confirmations
    }

    /// Number of accepted flags.
    #[must_use]
    pub const fn flags(&self) -> u32 {
        self.flags
    }

    /// Current derived status.
    #[must_use]
    pub const fn status(&self) -> VerificationStatus {
        self.verification_status
    }

    /// Voter ids that confirmed, in sorted order.
    pub fn confirm_voters(&self) -> impl Iterator<Item = &str> {
        self.confirm_voters.iter().map(String::as_str)
    }

    /// Voter ids that flagged, in sorted order.
    pub fn flag_voters(&self) -> impl Iterator<Item = &str> {
        self.flag_voters.iter().map(String::as_str)
    }

    /// Whether `voter_id` has already voted either way.
    #[must_use]
    pub fn has_voted(&self, voter_id: &str) -> bool {
        self.confirm_voters.contains(voter_id) || self.flag_voters.contains(voter_id)
    }

    /// Records a vote and recomputes the status.
    ///
    /// A voter who already voted (in either direction) is ignored and
    /// [`VoteStatus::AlreadyVoted`] is returned with the ledger untouched.
    pub fn record(&mut self, voter_id: &str, action: VoteAction) -> VoteStatus {
        if self.has_voted(voter_id) {
            return VoteStatus::AlreadyVoted;
        }

        match action {
            VoteAction::Confirm => {
                self.confirm_voters.insert(voter_id.to_string());
                self.confirmations += 1;
            }
            VoteAction::Flag => {
                self.flag_voters.insert(voter_id.to_string());
                self.flags += 1;
            }
        }

        self.verification_status = VerificationStatus::derive(self.confirmations, self.flags);
        VoteStatus::Recorded
    }
}
