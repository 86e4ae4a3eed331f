use std::collections::BTreeMap;

use num_rational::Ratio;
use pixel_bridge::exif::{extract, MetadataSource, MetadataUnavailable, RawExif, RawExifValue};
use pixel_bridge::symbolic::{ExactHost, SymbolicValue};

struct MapSource(BTreeMap<u16, RawExifValue>);

impl MetadataSource for MapSource {
    fn raw_entries(&self) -> Result<BTreeMap<u16, RawExifValue>, MetadataUnavailable> {
        Ok(self.0.clone())
    }
}

struct FailingSource;

impl MetadataSource for FailingSource {
    fn raw_entries(&self) -> Result<BTreeMap<u16, RawExifValue>, MetadataUnavailable> {
        Err(MetadataUnavailable)
    }
}

fn camera_tags() -> BTreeMap<u16, RawExifValue> {
    let mut map = BTreeMap::new();
    map.insert(271, RawExifValue::Text("ACME".into())); // Make
    map.insert(33434, RawExifValue::Rational(2, 4)); // ExposureTime
    map.insert(34855, RawExifValue::Integer(200)); // PhotographicSensitivity
    map.insert(37386, RawExifValue::Rational(100, 3)); // FocalLength
    map.insert(40960, RawExifValue::Bytes(vec![48, 49, 48, 48])); // FlashpixVersion
    map
}

#[test]
fn absent_source_means_no_metadata() {
    let _ = env_logger::builder().is_test(true).try_init();
    let result = extract(None, &mut ExactHost).expect("no host calls happen");
    assert_eq!(result, None);
}

#[test]
fn failing_source_means_no_metadata() {
    let result = extract(Some(&FailingSource), &mut ExactHost).expect("no host calls happen");
    assert_eq!(result, None);
}

#[test]
fn empty_map_means_no_metadata() {
    let source = MapSource(BTreeMap::new());
    let result = extract(Some(&source), &mut ExactHost).expect("no host calls happen");
    assert_eq!(result, None);
}

// Pins the historical asymmetry: an outright empty map is "no metadata",
// while a non-empty map with only unrecognized tags still yields a wrapper
// with an empty entry list. See DESIGN.md before changing either side.
#[test]
fn unknown_tags_yield_empty_wrapper() {
    let mut map = BTreeMap::new();
    map.insert(65000, RawExifValue::Integer(1));
    let result = extract(Some(&MapSource(map)), &mut ExactHost).expect("no host calls happen");
    assert_eq!(result, Some(RawExif { entries: vec![] }));
}

#[test]
fn entries_come_out_sorted_by_tag_id() {
    let block = extract(Some(&MapSource(camera_tags())), &mut ExactHost)
        .expect("all denominators nonzero")
        .expect("translatable entries present");
    let names: Vec<&str> = block.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "Make",
            "ExposureTime",
            "PhotographicSensitivity",
            "FocalLength",
            "FlashpixVersion",
        ]
    );
}

#[test]
fn values_are_translated_by_shape() {
    let block = extract(Some(&MapSource(camera_tags())), &mut ExactHost)
        .expect("all denominators nonzero")
        .expect("translatable entries present");
    let value_of = |name: &str| {
        &block
            .entries
            .iter()
            .find(|e| e.name == name)
            .unwrap_or_else(|| panic!("entry {name} missing"))
            .value
    };
    assert_eq!(value_of("Make"), &SymbolicValue::Text("ACME".into()));
    // 2/4 simplified by the host
    assert_eq!(
        value_of("ExposureTime"),
        &SymbolicValue::Rational(Ratio::new(1, 2))
    );
    assert_eq!(
        value_of("PhotographicSensitivity"),
        &SymbolicValue::Integer(200)
    );
    // FocalLength bypasses simplification and rounds to two decimals
    assert_eq!(value_of("FocalLength"), &SymbolicValue::Real(33.33));
    assert_eq!(
        value_of("FlashpixVersion"),
        &SymbolicValue::Text("48 49 48 48".into())
    );
}

#[test]
fn raw_exif_block_serializes_round_trip() {
    let block = extract(Some(&MapSource(camera_tags())), &mut ExactHost)
        .expect("all denominators nonzero")
        .expect("translatable entries present");
    let json = serde_json::to_string(&block).expect("serializable");
    let back: RawExif = serde_json::from_str(&json).expect("deserializable");
    assert_eq!(back, block);
}
