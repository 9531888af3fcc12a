use serde_json::Value;

use tsql_ast::{Identifier, MultiPartIdentifier, SchemaObjectName};

use crate::context::MarshalContext;
use crate::enums::quote_type_str;
use crate::node::{finish, insert_array, insert_if_some, insert_string, node, node_ref};

/// Marshals an `Identifier`, consulting `ctx` for whether this exact `Rc`
/// allocation was already emitted in full once before.
pub(crate) fn marshal_identifier(ctx: &mut MarshalContext, id: &std::rc::Rc<Identifier>) -> Value {
    if !ctx.mark_identifier(id) {
        return node_ref("Identifier");
    }
    let mut map = node("Identifier");
    insert_string(&mut map, "Value", id.value.clone());
    insert_string(&mut map, "QuoteType", quote_type_str(id.quote_type));
    finish(map)
}

pub(crate) fn marshal_multi_part_identifier(
    ctx: &mut MarshalContext,
    mpi: &MultiPartIdentifier,
) -> Value {
    let mut map = node("MultiPartIdentifier");
    map.insert("Count".to_string(), Value::from(mpi.count()));
    insert_array(
        &mut map,
        "Identifiers",
        mpi.identifiers
            .iter()
            .map(|id| marshal_identifier(ctx, id))
            .collect(),
    );
    finish(map)
}

/// `Identifiers` is emitted first (each identifier marshalled in full, the
/// first time its allocation is seen) and the four named slots are emitted
/// after; since every named slot shares `Rc` identity with one of the
/// `Identifiers` entries, marshalling them afterward always yields a
/// `$ref` (spec §3, §4.5, §9).
pub(crate) fn marshal_schema_object_name(
    ctx: &mut MarshalContext,
    name: &SchemaObjectName,
) -> Value {
    let mut map = node("SchemaObjectName");
    map.insert("Count".to_string(), Value::from(name.count()));
    insert_array(
        &mut map,
        "Identifiers",
        name.identifiers
            .iter()
            .map(|id| marshal_identifier(ctx, id))
            .collect(),
    );
    insert_if_some(
        &mut map,
        "ServerIdentifier",
        name.server.as_ref().map(|id| marshal_identifier(ctx, id)),
    );
    insert_if_some(
        &mut map,
        "DatabaseIdentifier",
        name.database
            .as_ref()
            .map(|id| marshal_identifier(ctx, id)),
    );
    insert_if_some(
        &mut map,
        "SchemaIdentifier",
        name.schema.as_ref().map(|id| marshal_identifier(ctx, id)),
    );
    insert_if_some(
        &mut map,
        "BaseIdentifier",
        name.base.as_ref().map(|id| marshal_identifier(ctx, id)),
    );
    finish(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsql_ast::QuoteType;

    #[test]
    fn schema_object_name_base_identifier_is_a_ref() {
        let mut ctx = MarshalContext::new();
        let name = SchemaObjectName::new(vec![
            Identifier::plain("dbo"),
            Identifier::new("t".to_string(), QuoteType::NotQuoted),
        ]);
        let value = marshal_schema_object_name(&mut ctx, &name);
        let obj = value.as_object().unwrap();
        assert_eq!(obj["Count"], 2);
        let identifiers = obj["Identifiers"].as_array().unwrap();
        assert_eq!(identifiers.len(), 2);
        assert!(identifiers[1].as_object().unwrap().contains_key("$type"));
        let base = &obj["BaseIdentifier"];
        assert_eq!(base["$ref"], "Identifier");
    }

    #[test]
    fn multi_part_identifier_count_matches_length() {
        let mut ctx = MarshalContext::new();
        let mpi = MultiPartIdentifier::new(vec![Identifier::plain("a"), Identifier::plain("b")]);
        let value = marshal_multi_part_identifier(&mut ctx, &mpi);
        assert_eq!(value["Count"], 2);
        assert_eq!(value["Identifiers"].as_array().unwrap().len(), 2);
    }
}
