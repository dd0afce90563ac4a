#![no_main]

use libfuzzer_sys::fuzz_target;
use tinymerge::descriptor::MethodDescriptor;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(descriptor) = MethodDescriptor::parse(text) {
            let _ = descriptor.slots(true);
            let _ = descriptor.to_string();
        }
    }
});
