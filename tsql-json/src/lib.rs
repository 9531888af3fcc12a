//! # tsql-json
//!
//! tsql-json marshals a [`tsql_ast::Script`] into the reference
//! ScriptDOM-compatible JSON shape (spec §4.5, §6): every node leads with a
//! `"$type"` key, field order is fixed per variant, and `Identifier`/
//! `GraphMatchNodeExpression` allocations that are reachable through two
//! paths of the same parent are serialized in full once and as `{"$ref":
//! ...}` afterward.

#![warn(missing_docs)]

mod context;
mod cursor;
mod ddl;
mod dml;
mod enums;
mod error;
mod expr;
mod ident;
mod misc;
mod node;
mod procedural;
mod query;
mod security;
mod statement;
mod table;
mod transaction;

use serde_json::Value;

use tsql_ast::{Batch, Script};

use crate::context::MarshalContext;
use crate::node::{finish, insert_array_if_nonempty, node};
use crate::statement::marshal_parsed_statement_list;

pub use crate::error::InternalInvariant;

/// Marshals a whole parsed [`Script`] to its reference JSON shape: `{"$type":
/// "TSqlScript", "Batches": [...]}`, with `Batches` omitted entirely when
/// there are none (spec §6).
pub fn script_to_json(script: &Script) -> Value {
    let mut ctx = MarshalContext::new();
    let mut map = node("TSqlScript");
    insert_array_if_nonempty(
        &mut map,
        "Batches",
        script
            .batches
            .iter()
            .map(|b| marshal_batch(&mut ctx, b))
            .collect(),
    );
    finish(map)
}

fn marshal_batch(ctx: &mut MarshalContext, batch: &Batch) -> Value {
    let mut map = node("TSqlBatch");
    insert_array_if_nonempty(
        &mut map,
        "Statements",
        marshal_parsed_statement_list(ctx, &batch.statements),
    );
    finish(map)
}

/// Marshals a whole parsed [`Script`] to a 2-space-indented JSON string
/// (spec §6). Equivalent to `serde_json::to_string_pretty` over
/// [`script_to_json`]'s result, since [`serde_json`]'s default pretty
/// formatter already uses a 2-space indent.
pub fn script_to_json_string(script: &Script) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&script_to_json(script))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsql_parser::Parser;

    fn parse(sql: &str) -> Script {
        Parser::parse_script(sql).expect("parse should succeed")
    }

    #[test]
    fn empty_script_omits_batches() {
        let script = Script::default();
        assert_eq!(script_to_json(&script), serde_json::json!({"$type": "TSqlScript"}));
    }

    #[test]
    fn select_one_matches_reference_shape() {
        let script = parse("SELECT 1;");
        let json = script_to_json(&script);
        let select_elements = &json["Batches"][0]["Statements"][0]["QueryExpression"]["SelectElements"];
        assert_eq!(
            select_elements[0],
            serde_json::json!({
                "$type": "SelectScalarExpression",
                "Expression": {"$type": "IntegerLiteral", "LiteralType": "Integer", "Value": "1"},
            })
        );
    }

    #[test]
    fn marshalling_is_deterministic() {
        let sql = "SELECT a.x, b.y FROM dbo.a AS a JOIN dbo.b AS b ON a.id = b.id WHERE a.x > 1;";
        let first = script_to_json_string(&parse(sql)).unwrap();
        let second = script_to_json_string(&parse(sql)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn create_table_shares_base_identifier_by_reference() {
        let script = parse("CREATE TABLE dbo.t (id INT PRIMARY KEY, name NVARCHAR(50) NOT NULL);");
        let json = script_to_json(&script);
        let stmt = &json["Batches"][0]["Statements"][0];
        assert_eq!(stmt["$type"], "CreateTableStatement");
        let identifiers = stmt["SchemaObjectName"]["Identifiers"].as_array().unwrap();
        assert_eq!(identifiers.len(), 2);
        assert_eq!(stmt["SchemaObjectName"]["BaseIdentifier"]["$ref"], "Identifier");
        let columns = stmt["ColumnDefinitions"].as_array().unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(
            columns[0]["Constraints"][0]["$type"],
            "UniqueConstraintDefinition"
        );
        assert_eq!(columns[0]["Constraints"][0]["IsPrimaryKey"], true);
        assert_eq!(
            columns[1]["Constraints"][0]["$type"],
            "NullableConstraintDefinition"
        );
        assert_eq!(columns[1]["Constraints"][0]["Nullable"], false);
    }

    #[test]
    fn merge_hoists_target_alias_and_tags_action_conditions() {
        let sql = "MERGE dbo.target AS t USING dbo.src AS s ON t.id = s.id \
                   WHEN MATCHED THEN UPDATE SET t.v = s.v \
                   WHEN NOT MATCHED BY TARGET THEN INSERT (id, v) VALUES (s.id, s.v);";
        let script = parse(sql);
        let json = script_to_json(&script);
        let spec = &json["Batches"][0]["Statements"][0]["MergeSpecification"];
        assert_eq!(spec["TableAlias"]["Value"], "t");
        let actions = spec["ActionClauses"].as_array().unwrap();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0]["Condition"], "Matched");
        assert_eq!(actions[1]["Condition"], "NotMatchedByTarget");
    }

    #[test]
    fn grant_marshals_columns_and_public_principal() {
        let script = parse("GRANT SELECT (c1, c2) ON OBJECT::dbo.t TO public;");
        let json = script_to_json(&script);
        let stmt = &json["Batches"][0]["Statements"][0];
        assert_eq!(stmt["$type"], "GrantStatement");
        assert_eq!(stmt["Permissions"][0]["Columns"].as_array().unwrap().len(), 2);
        assert_eq!(stmt["SecurityTargetObject"]["ObjectKind"], "Object");
        assert_eq!(stmt["Principals"][0]["PrincipalType"], "Public");
    }

    #[test]
    fn bulk_insert_canonicalizes_rowset_options() {
        let sql = "BULK INSERT t FROM 'f' WITH (ROWSET_OPTIONS = '{\"key\": \"value\"}');";
        let script = parse(sql);
        let json = script_to_json(&script);
        let stmt = &json["Batches"][0]["Statements"][0];
        assert_eq!(stmt["$type"], "BulkInsertStatement");
        assert_eq!(stmt["Options"][0]["Value"], r#"{"KEY":"VALUE"}"#);
    }

    #[test]
    fn create_table_distribution_policy_shares_first_column_by_reference() {
        let script = parse("CREATE TABLE dbo.t (id INT) WITH (DISTRIBUTION = HASH(id));");
        let json = script_to_json(&script);
        let policy = &json["Batches"][0]["Statements"][0]["DistributionPolicy"];
        assert_eq!(policy["$type"], "TableHashDistributionPolicy");
        assert_eq!(policy["DistributionColumn"]["Value"], "id");
        let columns = policy["DistributionColumns"].as_array().unwrap();
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0]["$ref"], "Identifier");
    }

    #[test]
    fn grant_leading_dots_produce_empty_identifier_components() {
        let script = parse("GRANT SELECT ON OBJECT::..t1 TO public WITH GRANT OPTION;");
        let json = script_to_json(&script);
        let stmt = &json["Batches"][0]["Statements"][0];
        let identifiers = stmt["SecurityTargetObject"]["ObjectName"]["Identifiers"]
            .as_array()
            .unwrap();
        assert_eq!(identifiers.len(), 3);
        assert_eq!(identifiers[0]["Value"], "");
        assert_eq!(identifiers[1]["Value"], "");
        assert_eq!(identifiers[2]["Value"], "t1");
    }

    #[test]
    fn deny_revoke_parse_cascade_and_as_principal() {
        let script = parse("REVOKE SELECT ON dbo.t FROM public CASCADE AS dbo;");
        let json = script_to_json(&script);
        let stmt = &json["Batches"][0]["Statements"][0];
        assert_eq!(stmt["$type"], "RevokeStatement");
        assert_eq!(stmt["Cascade"], true);
        assert_eq!(stmt["AsClause"]["Identifier"]["Value"], "dbo");
    }

    #[test]
    fn alter_index_rebuild_marshals_table_and_options() {
        let script = parse("ALTER INDEX ix_t ON dbo.t REBUILD WITH (ONLINE = ON);");
        let json = script_to_json(&script);
        let stmt = &json["Batches"][0]["Statements"][0];
        assert_eq!(stmt["$type"], "AlterIndexStatement");
        assert_eq!(stmt["Name"]["Value"], "ix_t");
        assert_eq!(stmt["All"], false);
        assert_eq!(stmt["AlterIndexType"], "Rebuild");
        assert_eq!(stmt["OnTable"]["$type"], "SchemaObjectName");
    }

    #[test]
    fn alter_index_all_sets_all_flag_and_omits_name() {
        let script = parse("ALTER INDEX ALL ON dbo.t DISABLE;");
        let json = script_to_json(&script);
        let stmt = &json["Batches"][0]["Statements"][0];
        assert_eq!(stmt["All"], true);
        assert!(stmt.as_object().unwrap().get("Name").is_none());
        assert_eq!(stmt["AlterIndexType"], "Disable");
    }

    #[test]
    fn create_trigger_on_table_captures_events_and_body() {
        let sql = "CREATE TRIGGER dbo.trg_t ON dbo.t AFTER INSERT, UPDATE AS SELECT 1;";
        let script = parse(sql);
        let json = script_to_json(&script);
        let stmt = &json["Batches"][0]["Statements"][0];
        assert_eq!(stmt["$type"], "CreateTriggerStatement");
        assert_eq!(stmt["TriggerScope"], "Object");
        assert_eq!(stmt["TriggerType"], "After");
        let events = stmt["TriggerEvents"].as_array().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["$type"], "EventTypeContainer");
        assert_eq!(events[0]["EventType"], "Insert");
        assert_eq!(stmt["StatementList"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn create_trigger_on_database_has_no_trigger_object() {
        let sql = "CREATE TRIGGER trg_ddl ON DATABASE FOR CREATE_TABLE AS SELECT 1;";
        let script = parse(sql);
        let json = script_to_json(&script);
        let stmt = &json["Batches"][0]["Statements"][0];
        assert_eq!(stmt["TriggerScope"], "Database");
        assert!(stmt.as_object().unwrap().get("TriggerObject").is_none());
        assert_eq!(stmt["TriggerEvents"][0]["EventType"], "CreateTable");
    }

    #[test]
    fn graph_match_predicate_shares_the_middle_node_by_reference() {
        let script = parse("SELECT * FROM a, b WHERE MATCH(a-(e)->b);");
        let json = script_to_json(&script);
        let predicate = &json["Batches"][0]["Statements"][0]["QueryExpression"]["WhereClause"];
        assert_eq!(predicate["$type"], "GraphMatchPredicate");
        let composite = &predicate["Expression"];
        assert_eq!(composite["$type"], "GraphMatchCompositeExpression");
        assert_eq!(composite["ArrowOnRight"], true);
        assert_eq!(composite["LeftNode"]["$type"], "GraphMatchNodeExpression");
        assert_eq!(composite["RightNode"]["$type"], "GraphMatchNodeExpression");
    }

    #[test]
    fn multi_part_identifier_count_matches_its_identifier_list_everywhere() {
        let script = parse("SELECT a.b.c.d FROM t;");
        let json = script_to_json(&script);
        let mpi = &json["Batches"][0]["Statements"][0]["QueryExpression"]["SelectElements"][0]
            ["Expression"]["MultiPartIdentifier"];
        let count = mpi["Count"].as_u64().unwrap();
        let identifiers = mpi["Identifiers"].as_array().unwrap();
        assert_eq!(count as usize, identifiers.len());
        assert_eq!(count, 4);
    }

    #[test]
    fn create_view_distribution_policy_marshals_view_variant() {
        let script = parse(
            "CREATE VIEW dbo.v WITH (DISTRIBUTION = HASH(a, b)) AS SELECT a, b FROM dbo.t;",
        );
        let json = script_to_json(&script);
        let policy = &json["Batches"][0]["Statements"][0]["DistributionPolicy"];
        assert_eq!(policy["$type"], "ViewHashDistributionPolicy");
        assert_eq!(policy["DistributionColumn"]["Value"], "a");
        let columns = policy["DistributionColumns"].as_array().unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0]["$ref"], "Identifier");
        assert_eq!(columns[1]["Value"], "b");
    }
}
