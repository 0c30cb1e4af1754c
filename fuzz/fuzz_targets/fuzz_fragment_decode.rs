#![no_main]

use ballot_transactions::Transaction;
use ballot_types::HeaderId;
use libfuzzer_sys::fuzz_target;

// Decoding arbitrary bytes never panics; whatever decodes re-encodes to the
// exact same bytes.
fuzz_target!(|data: &[u8]| {
    if let Ok(tx) = Transaction::deserialize(data) {
        assert_eq!(tx.serialize(), data);
        let _ = tx.verify(&HeaderId::new([0u8; 32]));
    }
});
