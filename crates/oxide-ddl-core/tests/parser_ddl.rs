//! Parser tests against real-world dump output.

mod common;
use common::*;

use oxide_ddl_core::schema::{Column, KeyKind, SqlOption};
use oxide_ddl_core::{parse_statements, MySqlRenderer, Parser, Renderer, TableStatement};

#[test]
fn dump_keeps_only_tables_and_views() {
    let statements = parse_statements(SHOP_57);
    let names: Vec<&str> = statements.iter().map(TableStatement::name).collect();
    assert_eq!(names, ["customers", "orders", "active_customers"]);
    assert!(statements[2].is_view());
}

#[test]
fn version_comment_partitioning() {
    let orders = parse_table(
        "CREATE TABLE `orders` (`id` int NOT NULL) ENGINE=InnoDB
/*!50100 PARTITION BY KEY (id)
PARTITIONS 4 */",
    );
    let spec = orders.partitioning.unwrap();
    assert_eq!(spec.partition_by.as_deref(), Some("KEY (id)"));
    assert_eq!(spec.partitions_num, Some(4));
}

#[test]
fn versioned_view_head() {
    let statements = parse_statements(
        "/*!50001 CREATE ALGORITHM=UNDEFINED */
/*!50013 DEFINER=`app`@`%` SQL SECURITY DEFINER */
/*!50001 VIEW `v` AS select 1 AS `one` */;",
    );
    let [TableStatement::View(view)] = statements.as_slice() else {
        panic!("expected one view, got {statements:?}");
    };
    assert_eq!(view.query, "select 1 AS `one`");
    assert_eq!(view.options.value_of("DEFINER"), Some("`app`@`%`"));
    assert_eq!(view.options.value_of("SQL SECURITY"), Some("DEFINER"));
}

#[test]
fn charset_spellings_are_unified() {
    let table = parse_table(
        "CREATE TABLE t (
            a VARCHAR(10) CHARSET latin1,
            b VARCHAR(10) CHARACTER SET latin1
        ) DEFAULT CHARACTER SET = utf8mb4 DEFAULT COLLATE = utf8mb4_bin",
    );
    let fields: Vec<_> = table.fields().collect();
    assert_eq!(fields[0].data_type, fields[1].data_type);
    assert_eq!(
        fields[0].data_type.options.get("CHARACTER SET"),
        Some(&SqlOption::with_value("CHARACTER SET", "latin1"))
    );
    assert_eq!(table.options.value_of("CHARACTER SET"), Some("utf8mb4"));
    assert_eq!(table.options.value_of("COLLATE"), Some("utf8mb4_bin"));
}

#[test]
fn key_and_index_are_synonyms() {
    let a = parse_table("CREATE TABLE t (x INT, KEY k (x))");
    let b = parse_table("CREATE TABLE t (x INT, INDEX k (x))");
    assert_eq!(a, b);
    let Column::Key(entry) = &a.columns[1] else {
        panic!("expected a key");
    };
    assert_eq!(entry.key.kind, KeyKind::Index);
}

#[test]
fn strings_and_comments() {
    let table = parse_table(
        "CREATE TABLE t ( -- trailing comment
            # hash comment
            s VARCHAR(20) DEFAULT 'it''s; fine' COMMENT \"say \\\"hi\\\"\" /* inline */,
            b BINARY(16) DEFAULT X'00ff'
        )",
    );
    let fields: Vec<_> = table.fields().collect();
    assert_eq!(
        fields[0].data_type.options.value_of("DEFAULT"),
        Some("'it''s; fine'")
    );
    assert_eq!(
        fields[0].data_type.options.value_of("COMMENT"),
        Some("\"say \\\"hi\\\"\"")
    );
    assert_eq!(fields[1].data_type.options.value_of("DEFAULT"), Some("X'00ff'"));
}

#[test]
fn unterminated_definition_is_an_error() {
    let err = Parser::new("CREATE TABLE t (id INT")
        .parse_statement()
        .unwrap_err();
    assert!(err.to_string().contains("position"));
}

#[test]
fn every_dump_statement_round_trips() {
    for statement in parse_statements(SHOP_80) {
        let rendered = MySqlRenderer.render_statement(&statement);
        assert_eq!(parse(&rendered), statement, "round trip of {rendered}");
    }
}
