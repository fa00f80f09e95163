use super::*;
use uw_cards_core::CardField;

fn int_fields() -> Vec<String> {
    vec!["glory".to_string(), "id".to_string(), "number".to_string()]
}

#[test]
fn test_parse_local_cards() {
    let csv = "\
name,number,glory,id,notes
Sudden Blow,1,,,
Deathly Fortitude,2,1,17,keep me";

    let cards = parse_local_cards(csv.as_bytes(), &int_fields()).unwrap();
    assert_eq!(cards.len(), 2);

    assert_eq!(cards[0].name, "Sudden Blow");
    assert_eq!(cards[0].number, Some(FieldValue::Int(1)));
    assert_eq!(cards[0].glory, Some(FieldValue::Int(0)));
    assert_eq!(cards[0].extra.get("notes"), Some(&FieldValue::text("")));

    assert_eq!(cards[1].attribute(CardField::Id), Some(&FieldValue::Int(17)));
    assert_eq!(cards[1].column("notes"), Some(&FieldValue::text("keep me")));
}

#[test]
fn test_parse_short_row() {
    let csv = "name,number,glory,notes\nSudden Blow,1,2\n";

    let cards = parse_local_cards(csv.as_bytes(), &int_fields()).unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].number, Some(FieldValue::Int(1)));
    assert_eq!(cards[0].glory, Some(FieldValue::Int(2)));
    assert_eq!(cards[0].column("notes"), None);
}

#[test]
fn test_parse_requires_name_column() {
    let csv = "title,number\nSudden Blow,1";
    let err = parse_local_cards(csv.as_bytes(), &int_fields()).unwrap_err();
    assert!(matches!(err, SyncError::MissingColumn { ref column, .. } if column == "name"));
}

#[test]
fn test_missing_csv_layout() {
    let card = UpstreamCard {
        gw_id: 55,
        name: "Ready for Action".to_string(),
        gw_card_type_id: 2,
        gw_card_set_id: 143,
        gw_warband_id: 9,
        gw_number: FieldValue::text("3"),
        image_url: "https://example.com/3.png".to_string(),
        image_filename: "3.png".to_string(),
        is_new: FieldValue::Bool(true),
    };

    let bytes = missing_csv(&[card]).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "gw_id,name,gw_card_type_id,gw_card_set_id,gw_warband_id,gw_number,image_url,image_filename,is_new",
            "55,Ready for Action,2,143,9,3,https://example.com/3.png,3.png,true",
        ]
    );
}

#[test]
fn test_missing_csv_header_only_when_empty() {
    let text = String::from_utf8(missing_csv(&[]).unwrap()).unwrap();
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn test_merged_json_is_indented_and_sorted() {
    let mut card = CardRecord::new("Sudden Blow");
    card.number = Some(FieldValue::Int(1));
    card.gw_id = Some(FieldValue::Int(4));

    let json = merged_json(&[card]).unwrap();
    assert_eq!(
        json,
        "[\n  {\n    \"gw_id\": 4,\n    \"name\": \"Sudden Blow\",\n    \"number\": 1\n  }\n]"
    );
}

#[test]
fn test_write_atomic_leaves_no_temp_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("out").join("cards-en.json");
    write_atomic(&path, b"[]").unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"[]");
    let names: Vec<_> = fs::read_dir(path.parent().unwrap())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names.len(), 1);
}

#[test]
fn test_write_outputs_keeps_previous_pair_on_failure() {
    let tmp = tempfile::TempDir::new().unwrap();
    let merged = tmp.path().join("cards-en.json");
    let missing = tmp.path().join("cards-Missing-en.csv");
    fs::write(&merged, b"old json").unwrap();
    fs::write(&missing, b"old csv").unwrap();
    // A directory where the CSV would be staged makes the second write fail.
    fs::create_dir(tmp.path().join("cards-Missing-en.csv.tmp")).unwrap();

    let err = write_outputs(&merged, &[CardRecord::new("Sudden Blow")], &missing, &[]).unwrap_err();

    assert!(matches!(err, SyncError::Io(_)));
    assert_eq!(fs::read(&merged).unwrap(), b"old json");
    assert_eq!(fs::read(&missing).unwrap(), b"old csv");
    assert!(!tmp.path().join("cards-en.json.tmp").exists());
}
