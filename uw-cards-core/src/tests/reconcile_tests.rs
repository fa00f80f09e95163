use super::*;

fn upstream(name: &str, number: i64) -> UpstreamCard {
    UpstreamCard {
        gw_id: 1000 + number,
        name: name.to_string(),
        gw_card_type_id: 1,
        gw_card_set_id: 10,
        gw_warband_id: 7,
        gw_number: FieldValue::text(number.to_string()),
        image_url: format!("https://example.com/{number}.png"),
        image_filename: format!("{number}.png"),
        is_new: FieldValue::Bool(false),
    }
}

fn local(name: &str, number: i64) -> CardRecord {
    let mut card = CardRecord::new(name);
    card.number = Some(FieldValue::Int(number));
    card
}

fn reconciler() -> Reconciler {
    Reconciler::new(CardTables::default())
}

#[test]
fn test_hydrates_matching_card() {
    let result = reconciler()
        .reconcile(&[upstream("A", 5)], vec![local("A", 5)])
        .unwrap();

    assert_eq!(result.merged.len(), 1);
    let card = &result.merged[0];
    assert_eq!(card.name, "A");
    assert_eq!(card.gw_id, Some(FieldValue::Int(1005)));
    assert_eq!(card.gw_warband_id, Some(FieldValue::Int(7)));
    assert_eq!(card.image_filename, Some(FieldValue::text("5.png")));
    assert!(result.missing.is_empty());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_local_value_wins_on_conflict() {
    let mut card = local("A", 5);
    card.gw_warband_id = Some(FieldValue::text("3"));

    let result = reconciler()
        .reconcile(&[upstream("A", 5)], vec![card])
        .unwrap();

    assert_eq!(result.merged[0].gw_warband_id, Some(FieldValue::text("3")));
    assert_eq!(result.conflicts(), 1);
    assert_eq!(
        result.diagnostics[0],
        Diagnostic::FieldConflict {
            card: "A".to_string(),
            field: CardField::GwWarbandId,
            upstream: FieldValue::Int(7),
            local: FieldValue::text("3"),
        }
    );
}

#[test]
fn test_equal_text_and_number_do_not_conflict() {
    let mut card = local("A", 5);
    card.gw_id = Some(FieldValue::text("1005"));
    card.gw_number = Some(FieldValue::Int(5));

    let result = reconciler()
        .reconcile(&[upstream("A", 5)], vec![card])
        .unwrap();

    assert_eq!(result.conflicts(), 0);
    assert_eq!(result.merged[0].gw_id, Some(FieldValue::Int(1005)));
}

#[test]
fn test_empty_local_value_is_filled() {
    let mut card = local("A", 5);
    card.image_url = Some(FieldValue::text(""));

    let result = reconciler()
        .reconcile(&[upstream("A", 5)], vec![card])
        .unwrap();

    assert_eq!(result.conflicts(), 0);
    assert_eq!(
        result.merged[0].image_url,
        Some(FieldValue::text("https://example.com/5.png"))
    );
}

#[test]
fn test_extra_columns_pass_through() {
    let mut card = local("A", 5);
    card.extra
        .insert("notes".to_string(), FieldValue::text("banned"));

    let result = reconciler()
        .reconcile(&[upstream("A", 5)], vec![card])
        .unwrap();

    assert_eq!(
        result.merged[0].extra.get("notes"),
        Some(&FieldValue::text("banned"))
    );
}

#[test]
fn test_alias_resolves_to_upstream_name() {
    let result = reconciler()
        .reconcile(
            &[upstream("Deathly Fortune", 7)],
            vec![local("Deathly Fortitude", 7)],
        )
        .unwrap();

    assert_eq!(result.merged.len(), 1);
    assert_eq!(result.merged[0].name, "Deathly Fortune");
    assert!(result.missing.is_empty());
}

#[test]
fn test_number_fallback_corrects_name() {
    let result = reconciler()
        .reconcile(&[upstream("Ready for Action", 12)], vec![local("Ready For Action", 12)])
        .unwrap();

    assert_eq!(result.merged[0].name, "Ready for Action");
    assert_eq!(result.name_mismatches(), 1);
    assert_eq!(
        result.diagnostics[0],
        Diagnostic::NameMismatch {
            number: 12,
            attempted: "Ready For Action".to_string(),
            corrected: "Ready for Action".to_string(),
        }
    );
}

#[test]
fn test_alias_then_number_fallback() {
    let tables = CardTables {
        aliases: [("Old".to_string(), "Also Wrong".to_string())].into(),
        ..CardTables::default()
    };
    let result = Reconciler::new(tables)
        .reconcile(&[upstream("Right", 3)], vec![local("Old", 3)])
        .unwrap();

    assert_eq!(result.merged[0].name, "Right");
    assert_eq!(
        result.diagnostics[0],
        Diagnostic::NameMismatch {
            number: 3,
            attempted: "Also Wrong".to_string(),
            corrected: "Right".to_string(),
        }
    );
}

#[test]
fn test_unresolved_card_is_fatal() {
    let err = reconciler()
        .reconcile(&[upstream("A", 1)], vec![local("Nowhere", 99)])
        .unwrap_err();

    match err {
        ReconcileError::Unresolved { name, number } => {
            assert_eq!(name, "Nowhere");
            assert_eq!(number, 99);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_upstream_is_fatal() {
    let err = reconciler().reconcile(&[], vec![local("A", 1)]).unwrap_err();
    assert!(matches!(err, ReconcileError::EmptyUpstream));
}

#[test]
fn test_missing_set() {
    let upstream = [upstream("A", 1), upstream("B", 2), upstream("C", 3)];
    let result = reconciler()
        .reconcile(&upstream, vec![local("A", 1), local("C", 3)])
        .unwrap();

    let missing: Vec<&str> = result.missing.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(missing, vec!["B"]);
}

#[test]
fn test_set_prefix_applied() {
    let mut card = upstream("Leader", 4);
    card.gw_card_set_id = 143;

    let result = reconciler()
        .reconcile(&[card, upstream("Other", 5)], vec![local("Leader", 4), local("Other", 5)])
        .unwrap();

    assert_eq!(result.merged[0].set_prefix, Some(FieldValue::text("L")));
    assert_eq!(result.merged[1].set_prefix, None);
}

#[test]
fn test_int_fields_always_present() {
    let mut card = CardRecord::new("A");
    card.glory = Some(FieldValue::text("two"));

    let result = reconciler()
        .reconcile(&[upstream("A", 5)], vec![card])
        .unwrap();

    let merged = &result.merged[0];
    assert_eq!(merged.glory, Some(FieldValue::Int(0)));
    assert_eq!(merged.id, Some(FieldValue::Int(0)));
    assert_eq!(merged.number, Some(FieldValue::Int(0)));
}

#[test]
fn test_duplicate_local_card_replaces_in_place() {
    let mut first = local("A", 1);
    first.glory = Some(FieldValue::Int(1));
    let mut second = local("A", 1);
    second.glory = Some(FieldValue::Int(2));

    let result = reconciler()
        .reconcile(
            &[upstream("A", 1), upstream("B", 2)],
            vec![first, local("B", 2), second],
        )
        .unwrap();

    let names: Vec<&str> = result.merged.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(result.merged[0].glory, Some(FieldValue::Int(2)));
    assert!(result
        .diagnostics
        .contains(&Diagnostic::DuplicateLocalName { name: "A".to_string() }));
}

#[test]
fn test_duplicate_upstream_name_reported() {
    let mut later = upstream("A", 2);
    later.gw_id = 42;

    let result = reconciler()
        .reconcile(&[upstream("A", 1), later], vec![local("A", 1)])
        .unwrap();

    assert_eq!(result.merged[0].gw_id, Some(FieldValue::Int(42)));
    assert!(result
        .diagnostics
        .contains(&Diagnostic::DuplicateUpstreamName { name: "A".to_string() }));
}

#[test]
fn test_unparsable_upstream_number_skipped_from_fallback() {
    let mut odd = upstream("Odd", 0);
    odd.gw_number = FieldValue::text("P1");

    let result = reconciler()
        .reconcile(&[odd, upstream("B", 2)], vec![local("B", 2)])
        .unwrap();

    assert_eq!(result.missing.len(), 1);
    assert!(matches!(
        result.diagnostics[0],
        Diagnostic::UnparsableNumber { .. }
    ));
}
