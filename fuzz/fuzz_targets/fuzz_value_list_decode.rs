#![no_main]

use libfuzzer_sys::fuzz_target;
use rustmam_core::encoding::reader::Reader;
use rustmam_core::services::attribute_list::AttributeValueList;

fuzz_target!(|data: &[u8]| {
    let mut r = Reader::new(data);
    let _ = AttributeValueList::decode(&mut r);
});
