//! The vote-cast wallet.

use ballot_crypto::{AccountSecretKey, Signer};
use ballot_genesis::SettingsProvider;
use ballot_transactions::{
    Certificate, FeeAlgorithm, Fragment, FragmentStatus, Input, TransactionError,
    UnsignedTransaction,
};
use ballot_types::{
    BlockDate, FragmentId, PublicKey, SpendingCounter, SpendingCounterSet, TypesError, Value,
    MAX_LANES,
};
use tracing::{debug, info, warn};

use crate::config::WalletConfig;
use crate::error::WalletError;
use crate::tracker::{Confirmation, FragmentTracker};

/// An account wallet: one signing key, the observed account state, and the
/// fragments signed since that state was observed.
pub struct Wallet<S = AccountSecretKey> {
    signer: S,
    total_value: Value,
    counters: SpendingCounterSet,
    tracker: FragmentTracker,
    strict_confirmation: bool,
}

impl Wallet<AccountSecretKey> {
    /// Import a 64-byte extended Ed25519 secret key.
    pub fn import_key(bytes: &[u8]) -> Result<Self, WalletError> {
        Self::import_key_with_config(bytes, &WalletConfig::default())
    }

    pub fn import_key_with_config(
        bytes: &[u8],
        config: &WalletConfig,
    ) -> Result<Self, WalletError> {
        let key = AccountSecretKey::from_extended_bytes(bytes)?;
        Ok(Self::with_signer(key, config))
    }

    /// Derive the account key from a 32-byte Ed25519 seed.
    pub fn from_seed(seed: &[u8; 32]) -> Result<Self, WalletError> {
        let key = AccountSecretKey::from_seed(seed)?;
        Ok(Self::with_signer(key, &WalletConfig::default()))
    }

    /// Create a wallet with a freshly generated key.
    pub fn generate() -> Result<Self, WalletError> {
        let key = AccountSecretKey::generate()?;
        Ok(Self::with_signer(key, &WalletConfig::default()))
    }
}

impl<S: Signer> Wallet<S> {
    pub fn with_signer(signer: S, config: &WalletConfig) -> Self {
        let wallet = Self {
            signer,
            total_value: Value::ZERO,
            counters: SpendingCounterSet::new(),
            tracker: FragmentTracker::new(config.max_tracked_fragments),
            strict_confirmation: config.strict_confirmation,
        };
        debug!(account = ?wallet.account_id(), "wallet opened");
        wallet
    }

    pub fn account_id(&self) -> PublicKey {
        self.signer.public_key()
    }

    /// Resynchronise with observed chain state.
    ///
    /// Lanes not listed reset to zero. The observed balance supersedes the
    /// fees reserved by pending fragments, but signed fragments are still
    /// remembered and can be confirmed afterwards. On an invalid lane the
    /// wallet is left unchanged.
    pub fn set_state<I>(&mut self, value: Value, counters: I) -> Result<(), WalletError>
    where
        I: IntoIterator<Item = SpendingCounter>,
    {
        let counters = SpendingCounterSet::from_counters(counters)?;
        self.total_value = value;
        self.counters = counters;
        self.tracker.release_reservations();
        debug!(%value, "wallet state set");
        Ok(())
    }

    /// Confirmed balance.
    pub fn total_value(&self) -> Value {
        self.total_value
    }

    /// Confirmed balance minus fees reserved by pending fragments.
    pub fn spendable_value(&self) -> Value {
        self.total_value.saturating_sub(self.tracker.reserved())
    }

    pub fn spending_counters(&self) -> SpendingCounterSet {
        self.counters
    }

    /// Build, sign and start tracking a transaction carrying `certificate`.
    ///
    /// The lane's counter is consumed only when a fragment is returned.
    pub fn sign_transaction<P: SettingsProvider + ?Sized>(
        &mut self,
        settings: &P,
        valid_until: BlockDate,
        lane: u8,
        certificate: Certificate,
    ) -> Result<Fragment, WalletError> {
        if lane as usize >= MAX_LANES {
            return Err(TypesError::InvalidLane(lane).into());
        }

        let fee = settings
            .fees()
            .calculate(Some(&certificate), 1, 0)
            .ok_or(TransactionError::FeeOverflow)?;
        let available = self.spendable_value();
        if fee > available {
            return Err(WalletError::InsufficientFunds {
                needed: fee,
                available,
            });
        }

        let counter = self.counters.next_usable_lane(lane)?;
        let input = Input {
            value: fee,
            account: self.account_id(),
        };
        let tx = UnsignedTransaction::new(certificate, valid_until, input).sign(
            &settings.chain_tag(),
            counter,
            &self.signer,
        );
        let fragment = Fragment::from_transaction(&tx);

        self.counters.increment(lane)?;
        self.tracker.track_pending(fragment.id, fee);
        info!(
            fragment_id = %fragment.id,
            lane,
            counter = counter.value,
            %fee,
            %valid_until,
            "signed vote-cast transaction"
        );
        Ok(fragment)
    }

    /// Record that `id` was included in a block.
    pub fn confirm_transaction(&mut self, id: &FragmentId) -> Result<(), WalletError> {
        match self.tracker.confirm(id) {
            Confirmation::Confirmed(fee) => {
                self.total_value = self.total_value.saturating_sub(fee);
                info!(fragment_id = %id, %fee, "fragment confirmed");
                Ok(())
            }
            Confirmation::AlreadyConfirmed => Ok(()),
            Confirmation::Unknown if self.strict_confirmation => {
                Err(WalletError::UnknownFragment(*id))
            }
            Confirmation::Unknown => {
                warn!(fragment_id = %id, "ignoring confirmation of unknown fragment");
                Ok(())
            }
        }
    }

    /// Fragments signed and not yet confirmed, oldest first.
    pub fn pending_transactions(&self) -> Vec<FragmentId> {
        self.tracker.pending()
    }

    pub fn fragment_status(&self, id: &FragmentId) -> Option<FragmentStatus> {
        self.tracker.status(id)
    }
}
