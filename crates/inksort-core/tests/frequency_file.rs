use inksort_core::{
    Error, SPACE_SENTINEL, count_characters, read_frequency_map, write_frequency_map,
};

#[test]
fn frequency_map_survives_a_trip_through_disk() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("deconstructed.json");

    let map = count_characters("It is a truth universally acknowledged,\nthat a single man");
    write_frequency_map(&path, &map).expect("write");

    let raw = std::fs::read_to_string(&path).expect("read raw");
    assert!(raw.starts_with('{') && raw.ends_with('}'));
    assert!(!raw.contains('\n'));
    assert!(raw.contains(SPACE_SENTINEL));

    let loaded = read_frequency_map(&path).expect("read");
    assert_eq!(loaded, map);
}

#[test]
fn missing_corpus_map_reports_the_path() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("nope.json");

    let err = read_frequency_map(&path).unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn writing_into_a_missing_directory_fails() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("missing").join("out.json");

    let err = write_frequency_map(&path, &count_characters("abc")).unwrap_err();
    assert!(matches!(err, Error::Write { .. }));
}
