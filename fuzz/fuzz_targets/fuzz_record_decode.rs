#![no_main]

use libfuzzer_sys::fuzz_target;
use rustmam_core::encoding::reader::Reader;
use rustmam_core::render::render_attribute;
use rustmam_core::types::Attribute;

fuzz_target!(|data: &[u8]| {
    let mut r = Reader::new(data);
    if let Ok(attr) = Attribute::decode(&mut r) {
        assert_eq!(attr.value().len(), usize::from(attr.length()));
        let _ = render_attribute(&attr);
    }
});
