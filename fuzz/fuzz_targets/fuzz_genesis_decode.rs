#![no_main]

use ballot_genesis::Settings;
use libfuzzer_sys::fuzz_target;

// Arbitrary bytes must never panic the genesis decoder, and anything it
// accepts must have a usable epoch length.
fuzz_target!(|data: &[u8]| {
    if let Ok(settings) = Settings::from_block0_bytes(data) {
        assert!(settings.epoch_length() > 0);
    }
});
