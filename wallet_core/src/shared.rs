//! Thread-safe handle over a [`Wallet`].

use std::sync::Arc;

use ballot_crypto::{AccountSecretKey, Signer};
use ballot_genesis::SettingsProvider;
use ballot_transactions::{Certificate, Fragment, FragmentStatus};
use ballot_types::{BlockDate, FragmentId, SpendingCounter, SpendingCounterSet, Value};
use parking_lot::Mutex;

use crate::error::WalletError;
use crate::wallet::Wallet;

/// A cloneable wallet handle. Every operation holds the lock for its full
/// duration, so counter selection, signing and increment happen atomically.
pub struct SharedWallet<S = AccountSecretKey> {
    inner: Arc<Mutex<Wallet<S>>>,
}

impl<S> Clone for SharedWallet<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Signer> SharedWallet<S> {
    pub fn new(wallet: Wallet<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(wallet)),
        }
    }

    pub fn set_state<I>(&self, value: Value, counters: I) -> Result<(), WalletError>
    where
        I: IntoIterator<Item = SpendingCounter>,
    {
        self.inner.lock().set_state(value, counters)
    }

    pub fn sign_transaction<P: SettingsProvider + ?Sized>(
        &self,
        settings: &P,
        valid_until: BlockDate,
        lane: u8,
        certificate: Certificate,
    ) -> Result<Fragment, WalletError> {
        self.inner
            .lock()
            .sign_transaction(settings, valid_until, lane, certificate)
    }

    pub fn confirm_transaction(&self, id: &FragmentId) -> Result<(), WalletError> {
        self.inner.lock().confirm_transaction(id)
    }

    pub fn total_value(&self) -> Value {
        self.inner.lock().total_value()
    }

    pub fn spendable_value(&self) -> Value {
        self.inner.lock().spendable_value()
    }

    pub fn spending_counters(&self) -> SpendingCounterSet {
        self.inner.lock().spending_counters()
    }

    pub fn pending_transactions(&self) -> Vec<FragmentId> {
        self.inner.lock().pending_transactions()
    }

    pub fn fragment_status(&self, id: &FragmentId) -> Option<FragmentStatus> {
        self.inner.lock().fragment_status(id)
    }

    /// Run `f` with exclusive access to the wallet.
    pub fn with<R>(&self, f: impl FnOnce(&mut Wallet<S>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl<S: Signer> From<Wallet<S>> for SharedWallet<S> {
    fn from(wallet: Wallet<S>) -> Self {
        Self::new(wallet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_genesis::{Block0Builder, ConfigParam, LinearFee, Settings};
    use ballot_transactions::{Payload, VoteCast};
    use ballot_types::{Discrimination, VotePlanId};
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn concurrent_signers_on_one_lane_never_share_a_counter() {
        let settings = Arc::new(
            Settings::from_block0_bytes(
                &Block0Builder::new()
                    .param(ConfigParam::Discrimination(Discrimination::Test))
                    .param(ConfigParam::Block0Date(0))
                    .param(ConfigParam::SlotDuration(1))
                    .param(ConfigParam::SlotsPerEpoch(10))
                    .param(ConfigParam::LinearFee(LinearFee::new(1, 0, 0)))
                    .build().unwrap(),
            )
            .unwrap(),
        );
        let wallet = SharedWallet::new(Wallet::from_seed(&[8u8; 32]).unwrap());
        wallet.set_state(Value(1_000), SpendingCounterSet::new()).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let wallet = wallet.clone();
                let settings = Arc::clone(&settings);
                thread::spawn(move || {
                    (0..5)
                        .map(|i| {
                            let cert = Certificate::vote_cast(VoteCast::new(
                                VotePlanId::from([t; 32]),
                                i,
                                Payload::new_public(0),
                            ));
                            wallet
                                .sign_transaction(&*settings, BlockDate::new(0, 1), 2, cert)
                                .unwrap()
                                .id
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: HashSet<_> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(ids.len(), 20);
        assert_eq!(wallet.spending_counters().get(2).unwrap().value, 20);
        assert_eq!(wallet.spendable_value(), Value(980));
        assert_eq!(wallet.pending_transactions().len(), 20);
    }
}
