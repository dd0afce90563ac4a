#![no_main]

use libfuzzer_sys::fuzz_target;
use tinymerge::tiny::{TinyFile, TinyWriter};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(tiny) = TinyFile::parse(text) else {
        return;
    };

    // Whatever parses must be writable again under the same header
    let mut writer = TinyWriter::new(&tiny.header);
    for class in &tiny.classes {
        if writer.class(&class.names).is_err() {
            return;
        }
    }
    let _ = writer.finish();
});
