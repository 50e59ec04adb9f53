use easy_converter_compiler::{
    convert_tables, decode_row, decode_table, encode, parse_definition, CellValue,
    ConvertError, ConvertOptions, RawTable, Table,
};
use easy_converter_wire::Value;

fn raw_table(name: &str, names: &[&str], defs: &[&str], rows: Vec<Vec<CellValue>>) -> RawTable {
    RawTable {
        name:         name.to_string(),
        header_names: names.iter().map(|s| s.to_string()).collect(),
        header_defs:  defs.iter().map(|s| s.to_string()).collect(),
        rows,
    }
}

fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

fn items_table() -> RawTable {
    raw_table(
        "Items",
        &["id", "Reward", "rarity"],
        &["int", "Struct<int,gold,int,exp>", "Enum<Common,0,Rare,1,Epic,2>"],
        vec![vec![CellValue::Integer(1), text("100,5"), text("Rare")]],
    )
}

fn quests_table() -> RawTable {
    raw_table(
        "Quests",
        &["id", "reward", "bonus", "grade"],
        &["int", "@Items,SReward", "List<@Items,SReward>", "@Items,Rarity"],
        vec![
            vec![CellValue::Integer(10), text("50,2"), text("1,1,2,2"), text("Epic")],
            vec![CellValue::Empty, text("ignored"), text(""), text("")],
            vec![CellValue::Integer(11), text(""), text(""), text("Common")],
        ],
    )
}

fn table<'a>(tables: &'a [Table], name: &str) -> &'a Table {
    tables.iter().find(|t| t.name() == name).unwrap()
}

#[test]
fn scenario_list_of_ints() {
    let field = parse_definition("Hero", "skills", "List<int>").unwrap();
    assert_eq!(encode("1,2,3", &field).unwrap(), "3,1,2,3");
    assert_eq!(encode("", &field).unwrap(), "0");
}

#[test]
fn scenario_map_struct_enum() {
    let map = parse_definition("Hero", "attribute", "Map<string,int>").unwrap();
    assert_eq!(encode("a,1,b,2", &map).unwrap(), "2,a,1,b,2");

    let point = parse_definition("Hero", "point", "Struct<int,x,string,y>").unwrap();
    assert_eq!(encode("5,hello", &point).unwrap(), "5,hello");

    let color = parse_definition("Hero", "color", "Enum<Red,0,Green,1,Blue,2>").unwrap();
    assert_eq!(encode("Green", &color).unwrap(), "1");
    assert!(matches!(
        encode("Purple", &color),
        Err(ConvertError::UnknownEnumKey { .. })
    ));
}

#[test]
fn convert_resolves_references_across_tables() {
    let tables = convert_tables(vec![quests_table(), items_table()], &ConvertOptions::default()).unwrap();
    let names: Vec<&str> = tables.iter().map(Table::name).collect();
    assert_eq!(names, ["Items", "Quests"]);

    let quests = table(&tables, "Quests");
    assert_eq!(quests.rows.len(), 2);
    assert_eq!(quests.rows[0].to_wire(), "10,50,2,2,1,1,2,2,2");
    assert_eq!(quests.rows[1].to_wire(), "11,,,0,0");
    assert_eq!(quests.pack(), "10,50,2,2,1,1,2,2,2\n11,,,0,0");

    let items = table(&tables, "Items");
    assert_eq!(items.pack(), "1,100,5,1");
}

#[test]
fn table_names_are_kept_as_given() {
    let items = raw_table(
        "items",
        &["id", "Reward"],
        &["int", "Struct<int,gold,int,exp>"],
        vec![vec![CellValue::Integer(1), text("100,5")]],
    );
    let quests = raw_table(
        "quests",
        &["id", "reward"],
        &["int", "@items,SReward"],
        vec![vec![CellValue::Integer(10), text("50,2")]],
    );
    let tables = convert_tables(vec![quests, items], &ConvertOptions::default()).unwrap();
    let names: Vec<&str> = tables.iter().map(Table::name).collect();
    assert_eq!(names, ["items", "quests"]);
    assert_eq!(table(&tables, "quests").pack(), "10,50,2");
}

#[test]
fn nested_types_are_referenced_by_placeholder_name() {
    let items = raw_table(
        "Items",
        &["id", "Reward"],
        &["int", "Struct<Struct<int,x,int,y>,pos,Enum<Low,0,High,1>,tier>"],
        vec![],
    );
    let quests = raw_table(
        "Quests",
        &["id", "pos", "tier"],
        &["int", "@Items,S", "@Items,E"],
        vec![vec![CellValue::Integer(1), text("3,4"), text("High")]],
    );
    let tables = convert_tables(vec![items, quests], &ConvertOptions::default()).unwrap();
    assert_eq!(table(&tables, "Quests").pack(), "1,3,4,1");
}

#[test]
fn empty_enum_cells_encode_empty() {
    let quests = raw_table(
        "Quests",
        &["id", "grade", "rank"],
        &["int", "@Items,Rarity", "Enum<Low,0,High,1>"],
        vec![
            vec![CellValue::Integer(1), CellValue::Empty, text("High")],
            vec![CellValue::Integer(2), text("Rare")],
        ],
    );
    let tables = convert_tables(vec![items_table(), quests], &ConvertOptions::default()).unwrap();
    assert_eq!(table(&tables, "Quests").pack(), "1,,1\n2,1,");
}

#[test]
fn self_referencing_struct_is_an_error() {
    let nodes = raw_table(
        "Nodes",
        &["id", "node"],
        &["int", "Struct<int,v,@Nodes,Node,next>"],
        vec![vec![CellValue::Integer(1), text("1")]],
    );
    let err = convert_tables(vec![nodes], &ConvertOptions::default()).unwrap_err();
    match err {
        ConvertError::RecursiveStruct { table, field, type_name } => {
            assert_eq!(
                (table.as_str(), field.as_str(), type_name.as_str()),
                ("Nodes", "next", "Node")
            );
        }
        other => panic!("expected RecursiveStruct, got {:?}", other),
    }
}

#[test]
fn self_reference_through_a_list_is_allowed() {
    let nodes = raw_table(
        "Nodes",
        &["id", "node"],
        &["int", "Struct<int,v,List<@Nodes,Node>,children>"],
        vec![vec![CellValue::Integer(1), text("7")]],
    );
    let tables = convert_tables(vec![nodes], &ConvertOptions::default()).unwrap();
    assert_eq!(tables[0].pack(), "1,7,0");
}

#[test]
fn resolution_is_independent_of_input_order() {
    let forward = convert_tables(vec![items_table(), quests_table()], &ConvertOptions::default()).unwrap();
    let backward = convert_tables(vec![quests_table(), items_table()], &ConvertOptions::default()).unwrap();
    let packed = |tables: &[Table]| tables.iter().map(Table::pack).collect::<Vec<_>>();
    assert_eq!(packed(&forward), packed(&backward));
}

#[test]
fn missing_target_table_fails_at_encode() {
    let err = convert_tables(vec![quests_table()], &ConvertOptions::default()).unwrap_err();
    match err {
        ConvertError::UnresolvedReference { table, field, target_table, target_type } => {
            assert_eq!(
                (table.as_str(), field.as_str(), target_table.as_str(), target_type.as_str()),
                ("Quests", "reward", "Items", "SReward")
            );
        }
        other => panic!("expected UnresolvedReference, got {:?}", other),
    }
}

#[test]
fn unreferenced_missing_target_is_not_an_error() {
    // a reference that never encodes a cell does not need its target
    let lonely = raw_table("Lonely", &["id", "link"], &["int", "@Nowhere,SThing"], vec![]);
    let tables = convert_tables(vec![lonely], &ConvertOptions::default()).unwrap();
    assert_eq!(tables[0].pack(), "");
}

#[test]
fn underscore_tables_are_skipped() {
    let notes = raw_table("_notes", &["broken"], &["List<"], vec![]);
    let tables = convert_tables(vec![notes, items_table()], &ConvertOptions::default()).unwrap();
    assert_eq!(tables.len(), 1);

    let keep_all = ConvertOptions { skip_prefix: String::new() };
    let notes = raw_table("_notes", &["broken"], &["List<"], vec![]);
    assert!(convert_tables(vec![notes], &keep_all).is_err());
}

#[test]
fn data_errors_carry_context() {
    let mut items = items_table();
    items.rows.push(vec![CellValue::Integer(2), text("1,2"), text("Legendary")]);
    let err = convert_tables(vec![items], &ConvertOptions::default()).unwrap_err();
    match err {
        ConvertError::UnknownEnumKey { table, field, key } => {
            assert_eq!((table.as_str(), field.as_str(), key.as_str()), ("Items", "rarity", "Legendary"));
        }
        other => panic!("expected UnknownEnumKey, got {:?}", other),
    }
}

#[test]
fn header_errors_abort_the_run() {
    let bad = raw_table("Bad", &["id", "name"], &["int"], vec![]);
    assert!(matches!(
        convert_tables(vec![items_table(), bad], &ConvertOptions::default()),
        Err(ConvertError::HeaderMismatch { .. })
    ));
}

#[test]
fn converted_rows_decode_back() {
    let tables = convert_tables(vec![items_table(), quests_table()], &ConvertOptions::default()).unwrap();
    let items = table(&tables, "Items");
    let rows = decode_table(&items.scheme, &items.pack()).unwrap();
    assert_eq!(rows, vec![vec![
        Value::Int(1),
        Value::Struct(vec![("gold".into(), Value::Int(100)), ("exp".into(), Value::Int(5))]),
        Value::Enum(1),
    ]]);

    let quests = table(&tables, "Quests");
    let first = decode_row(&quests.scheme, &quests.rows[0].to_wire()).unwrap();
    assert_eq!(first[0], Value::Int(10));
    assert_eq!(first[1].get("gold"), Some(&Value::Int(50)));
    assert_eq!(first[2].len(), 2);
    assert_eq!(first[2].as_list()[1].get("exp"), Some(&Value::Int(2)));
    assert_eq!(first[3], Value::Enum(2));

    // empty int slots do not read back as numbers
    assert!(decode_table(&quests.scheme, &quests.pack()).is_err());
}
