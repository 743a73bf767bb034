use rya::consts::{HASH_PREFIX_LEN, ROW_DELIM, XSD_INT};
use rya::{
    RowKeyHashing, RyaConfig, RyaIri, RyaStatement, RyaType, TableLayout, TripleContext,
    TripleRowResolverError,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn iri(s: &str) -> RyaIri {
    RyaIri::new(s).expect("iri")
}

fn statement() -> RyaStatement {
    RyaStatement::builder()
        .subject(iri("urn:test#subj"))
        .predicate(iri("urn:test#pred"))
        .object(RyaType::plain("mydata"))
        .timestamp(1_700_000_000_000i64)
        .build()
        .expect("statement")
}

#[test]
fn spo_row_roundtrip_without_hashing() {
    init();
    let context = TripleContext::new(&RyaConfig::default());
    let statement = statement();
    let rows = context.serialize_triple(&statement).expect("rows");
    let back = context
        .deserialize_triple(TableLayout::Spo, &rows[&TableLayout::Spo])
        .expect("statement");
    assert_eq!(back, statement);
}

#[test]
fn every_layout_roundtrips() {
    init();
    for hashing in [RowKeyHashing::Disabled, RowKeyHashing::Enabled] {
        let context = TripleContext::new(&RyaConfig::new(hashing, "rya_"));
        let statement = statement();
        let rows = context.serialize_triple(&statement).expect("rows");
        assert_eq!(rows.len(), TableLayout::all().len());
        for (&layout, row) in &rows {
            let back = context.deserialize_triple(layout, row).expect("statement");
            assert_eq!(back, statement, "layout {}", layout);
        }
    }
}

#[test]
fn hashed_rows_still_reconstruct_exactly() {
    init();
    let context = TripleContext::new(&RyaConfig::new(true, "rya_"));
    let statement = statement();
    let rows = context.serialize_triple(&statement).expect("rows");
    let row = &rows[&TableLayout::Spo];
    // fixed-width hex hash, then a delimiter, then the plain segments
    assert_eq!(row.row[HASH_PREFIX_LEN], ROW_DELIM);
    assert!(row.row[..HASH_PREFIX_LEN]
        .iter()
        .all(|b| b.is_ascii_hexdigit()));
    let back = context
        .deserialize_triple(TableLayout::Spo, row)
        .expect("statement");
    assert_eq!(back, statement);
}

#[test]
fn context_visibility_and_metadata_survive() {
    init();
    let context = TripleContext::new(&RyaConfig::default());
    let statement = RyaStatement::builder()
        .subject(iri("urn:test#subj"))
        .predicate(iri("urn:test#pred"))
        .object(RyaType::new(XSD_INT.into(), "42"))
        .context(iri("urn:test#context"))
        .column_visibility(b"group|admin".to_vec())
        .timestamp(1_700_000_000_000i64)
        .metadata("source=ingest".to_string())
        .build()
        .expect("statement");
    let rows = context.serialize_triple(&statement).expect("rows");
    for (&layout, row) in &rows {
        assert_eq!(row.column_visibility, b"group|admin");
        assert_eq!(row.timestamp, 1_700_000_000_000i64);
        assert_eq!(row.value, b"source=ingest");
        let back = context.deserialize_triple(layout, row).expect("statement");
        assert_eq!(back, statement);
    }
}

#[test]
fn object_with_delimiter_bytes_roundtrips_in_every_layout() {
    init();
    let context = TripleContext::new(&RyaConfig::default());
    let statement = RyaStatement::builder()
        .subject(iri("urn:test#subj"))
        .predicate(iri("urn:test#pred"))
        .object(RyaType::plain("my\u{0}data\u{1}"))
        .timestamp(1i64)
        .build()
        .expect("statement");
    let rows = context.serialize_triple(&statement).expect("rows");
    for (&layout, row) in &rows {
        let back = context.deserialize_triple(layout, row).expect("statement");
        assert_eq!(back, statement, "layout {}", layout);
    }
}

#[test]
fn row_keys_differ_per_layout() {
    init();
    let context = TripleContext::new(&RyaConfig::default());
    let rows = context.serialize_triple(&statement()).expect("rows");
    assert_ne!(rows[&TableLayout::Spo].row, rows[&TableLayout::Pos].row);
    assert_ne!(rows[&TableLayout::Pos].row, rows[&TableLayout::Osp].row);
    assert_ne!(rows[&TableLayout::Spo].row, rows[&TableLayout::Osp].row);
}

#[test]
fn hashed_and_plain_rows_are_mutually_malformed() {
    init();
    let plain = TripleContext::new(&RyaConfig::new(false, "rya_"));
    let hashed = TripleContext::new(&RyaConfig::new(true, "rya_"));
    let statement = statement();

    let plain_rows = plain.serialize_triple(&statement).expect("rows");
    let result = hashed.deserialize_triple(TableLayout::Spo, &plain_rows[&TableLayout::Spo]);
    assert!(matches!(
        result,
        Err(TripleRowResolverError::MalformedRow {
            expected: 4,
            found: 3,
            ..
        })
    ));

    let hashed_rows = hashed.serialize_triple(&statement).expect("rows");
    let result = plain.deserialize_triple(TableLayout::Spo, &hashed_rows[&TableLayout::Spo]);
    assert!(matches!(
        result,
        Err(TripleRowResolverError::MalformedRow {
            expected: 3,
            found: 4,
            ..
        })
    ));
}

#[test]
fn truncated_row_is_malformed() {
    init();
    let context = TripleContext::new(&RyaConfig::default());
    let statement = statement();
    let rows = context.serialize_triple(&statement).expect("rows");
    let mut row = rows[&TableLayout::Spo].clone();
    // cut the row off inside the predicate segment
    let first_delim = row.row.iter().position(|&b| b == ROW_DELIM).expect("delim");
    row.row.truncate(first_delim + 3);
    assert!(matches!(
        context.deserialize_triple(TableLayout::Spo, &row),
        Err(TripleRowResolverError::MalformedRow { .. })
    ));
}
