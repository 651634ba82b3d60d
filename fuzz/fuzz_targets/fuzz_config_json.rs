//! Fuzz target: `SystemConfig::from_json` + `validate`
//!
//! Arbitrary bytes must either be rejected with a config error or yield a
//! configuration that passes validation again.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use fanlink::config::SystemConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = SystemConfig::from_json(data) {
        assert!(config.validate().is_ok());
        let _ = config.actuation.timer.carrier_hz();
    }
});
