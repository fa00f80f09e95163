use super::*;
use serde_json::json;

fn raw_card() -> serde_json::Value {
    json!({
        "id": 4521,
        "title": { "rendered": "312. Deathly Fortune" },
        "card_types": [12, 40],
        "sets": [143],
        "warbands": [9],
        "acf": {
            "card_number": "312",
            "card_image": {
                "url": "https://example.com/img/312.png",
                "filename": "312.png"
            },
            "is_new": false
        },
        "link": "ignored"
    })
}

#[test]
fn test_adapt_full_record() {
    let cards = adapt_cards(vec![raw_card()]).unwrap();
    assert_eq!(cards.len(), 1);

    let card = &cards[0];
    assert_eq!(card.gw_id, 4521);
    assert_eq!(card.name, "Deathly Fortune");
    assert_eq!(card.gw_card_type_id, 12);
    assert_eq!(card.gw_card_set_id, 143);
    assert_eq!(card.gw_warband_id, 9);
    assert_eq!(card.gw_number, FieldValue::text("312"));
    assert_eq!(card.number(), Some(312));
    assert_eq!(card.image_url, "https://example.com/img/312.png");
    assert_eq!(card.image_filename, "312.png");
    assert_eq!(card.is_new, FieldValue::Bool(false));
}

#[test]
fn test_adapt_numeric_card_number() {
    let mut raw = raw_card();
    raw["acf"]["card_number"] = json!(7);
    let cards = adapt_cards(vec![raw]).unwrap();
    assert_eq!(cards[0].gw_number, FieldValue::Int(7));
}

#[test]
fn test_missing_nested_key_is_fatal() {
    let mut raw = raw_card();
    raw["acf"]["card_image"]
        .as_object_mut()
        .unwrap()
        .remove("filename");
    let ok = raw_card();

    let err = adapt_cards(vec![ok, raw]).unwrap_err();
    match err {
        SchemaError::Malformed { index, .. } => assert_eq!(index, 1),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_is_new_is_fatal() {
    let mut raw = raw_card();
    raw["acf"].as_object_mut().unwrap().remove("is_new");
    assert!(matches!(
        adapt_cards(vec![raw]),
        Err(SchemaError::Malformed { index: 0, .. })
    ));
}

#[test]
fn test_empty_warband_list_is_fatal() {
    let mut raw = raw_card();
    raw["warbands"] = json!([]);
    let err = adapt_cards(vec![raw]).unwrap_err();
    assert!(matches!(
        err,
        SchemaError::EmptyList {
            card: 4521,
            field: "warbands"
        }
    ));
}
