#![no_main]

use libfuzzer_sys::fuzz_target;
use rustmam_core::encoding::reader::Reader;
use rustmam_core::services::attribute_list::AttributeIdList;

fuzz_target!(|data: &[u8]| {
    let mut r = Reader::new(data);
    let _ = AttributeIdList::decode(&mut r);
});
