#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let info = gifmeta::info(data);
    assert_eq!(gifmeta::is_animated(data), info.animated());
});
