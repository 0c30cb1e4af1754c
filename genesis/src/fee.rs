//! Linear fee schedule carried in the genesis block.

use serde::{Deserialize, Serialize};

/// Fee override for vote certificates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerVoteCertificateFee {
    pub certificate_vote_plan: u64,
    pub certificate_vote_cast: u64,
}

/// `constant + coefficient * (inputs + outputs) + certificate`.
///
/// When `per_vote_certificate_fees` is present, its vote-cast fee replaces the
/// generic `certificate` term for vote-cast transactions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearFee {
    pub constant: u64,
    pub coefficient: u64,
    pub certificate: u64,
    pub per_vote_certificate_fees: Option<PerVoteCertificateFee>,
}

impl LinearFee {
    pub fn new(constant: u64, coefficient: u64, certificate: u64) -> Self {
        Self {
            constant,
            coefficient,
            certificate,
            per_vote_certificate_fees: None,
        }
    }

    pub fn with_per_vote_certificate_fees(mut self, fees: PerVoteCertificateFee) -> Self {
        self.per_vote_certificate_fees = Some(fees);
        self
    }

    /// The certificate term applied to a vote-cast transaction.
    pub fn vote_cast_certificate(&self) -> u64 {
        self.per_vote_certificate_fees
            .map(|f| f.certificate_vote_cast)
            .unwrap_or(self.certificate)
    }
}
