//! Fee calculation for certificate-carrying transactions.

use ballot_genesis::LinearFee;
use ballot_types::Value;

use crate::certificate::Certificate;

/// Computes the fee a transaction must pay.
pub trait FeeAlgorithm {
    /// `None` on arithmetic overflow.
    fn calculate(
        &self,
        certificate: Option<&Certificate>,
        inputs: usize,
        outputs: usize,
    ) -> Option<Value>;
}

impl<F: FeeAlgorithm + ?Sized> FeeAlgorithm for &F {
    fn calculate(
        &self,
        certificate: Option<&Certificate>,
        inputs: usize,
        outputs: usize,
    ) -> Option<Value> {
        (**self).calculate(certificate, inputs, outputs)
    }
}

impl FeeAlgorithm for LinearFee {
    fn calculate(
        &self,
        certificate: Option<&Certificate>,
        inputs: usize,
        outputs: usize,
    ) -> Option<Value> {
        let msz = (inputs as u64).checked_add(outputs as u64)?;
        let cert = match certificate {
            Some(Certificate::VoteCast(_)) => self.vote_cast_certificate(),
            None => 0,
        };
        let fee = self
            .coefficient
            .checked_mul(msz)?
            .checked_add(self.constant)?
            .checked_add(cert)?;
        Some(Value(fee))
    }
}
