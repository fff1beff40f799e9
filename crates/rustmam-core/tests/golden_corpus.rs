use rustmam_core::encoding::reader::Reader;
use rustmam_core::services::attribute_list::{AttributeIdList, AttributeValueList, LIST_HEADER_LEN};
use rustmam_core::types::{Attribute, AttributeFormat, AttributeId};
use std::fs;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .canonicalize()
        .expect("workspace root should be resolvable")
}

fn parse_hex_fixture(path: &Path) -> Vec<u8> {
    let content = fs::read_to_string(path).expect("fixture must be readable");
    let name = path.display();
    let mut out = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        for token in trimmed.split_whitespace() {
            let byte = u8::from_str_radix(token, 16)
                .unwrap_or_else(|_| panic!("invalid hex token '{token}' in {name}"));
            out.push(byte);
        }
    }
    out
}

fn fixture(name: &str) -> Vec<u8> {
    parse_hex_fixture(&workspace_root().join("fixtures/golden").join(name))
}

#[test]
fn golden_corpus_fixtures_decode_by_kind() {
    let fixture_dir = workspace_root().join("fixtures/golden");
    let mut fixture_files = fs::read_dir(&fixture_dir)
        .expect("fixtures directory should exist")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "hex"))
        .collect::<Vec<_>>();
    fixture_files.sort();
    assert!(
        !fixture_files.is_empty(),
        "expected at least one corpus fixture in {}",
        fixture_dir.display()
    );

    for fixture in fixture_files {
        let bytes = parse_hex_fixture(&fixture);
        let name = fixture
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_owned();
        let mut r = Reader::new(&bytes);

        if name.starts_with("idlist_") {
            AttributeIdList::decode(&mut r)
                .unwrap_or_else(|e| panic!("fixture {name} failed id list decode: {e}"));
        } else if name.starts_with("values_") {
            let list = AttributeValueList::decode(&mut r)
                .unwrap_or_else(|e| panic!("fixture {name} failed value list decode: {e}"));
            for attr in &list.attributes {
                assert_eq!(attr.value().len(), usize::from(attr.length()));
            }
        } else if name.starts_with("record_") {
            r.skip(LIST_HEADER_LEN).unwrap();
            Attribute::decode(&mut r)
                .unwrap_or_else(|e| panic!("fixture {name} failed record decode: {e}"));
        } else {
            panic!("fixture {name} has no known kind prefix");
        }
        assert!(r.is_empty(), "fixture {name} has trailing bytes");
    }
}

#[test]
fn available_list_fixture_preserves_order() {
    let bytes = fixture("idlist_available.hex");
    let list = AttributeIdList::decode(&mut Reader::new(&bytes)).unwrap();
    let raw: Vec<u16> = list.ids.iter().map(|id| id.raw()).collect();
    let expected = [
        0x0000, 0x0001, 0x0002, 0x0003, 0x0004, 0x0400, 0x0401, 0x0406, 0x0806, 0x1000,
    ];
    assert_eq!(raw, expected);
}

#[test]
fn value_list_fixture_contents() {
    let bytes = fixture("values_medium.hex");
    let list = AttributeValueList::decode(&mut Reader::new(&bytes)).unwrap();
    let manufacturer = &list.attributes[0];
    assert_eq!(manufacturer.id(), AttributeId::new(0x0400));
    assert_eq!(manufacturer.value(), b"IBM     ");
    assert!(manufacturer.read_only());
    assert_eq!(list.attributes[2].format(), AttributeFormat::Binary);
    assert_eq!(list.attributes[2].value(), &[0x00, 0x00, 0x03, 0x84]);
}
