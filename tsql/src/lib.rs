//! # tsql
//!
//! tsql parses Microsoft T-SQL scripts and marshals them to the reference
//! ScriptDOM-compatible JSON shape. It is a thin facade over
//! [`tsql_lexer`], [`tsql_ast`], [`tsql_parser`] and [`tsql_json`].

#![warn(missing_docs)]

pub use tsql_ast as ast;
pub use tsql_json as json;
pub use tsql_lexer as lexer;
pub use tsql_parser as parser;

pub use tsql_ast::Script;
pub use tsql_parser::ParserError;

/// Parses a T-SQL script into its [`Script`] AST (spec §4.2's batch-split,
/// lenient-recovery entry point). Equivalent to [`tsql_parser::Parser::parse_script`].
pub fn parse_script(sql: &str) -> Result<Script, ParserError> {
    tsql_parser::Parser::parse_script(sql)
}

/// Marshals a parsed [`Script`] to its reference JSON shape (spec §4.5, §6).
pub fn to_json(script: &Script) -> serde_json::Value {
    tsql_json::script_to_json(script)
}

/// Marshals a parsed [`Script`] to a pretty-printed JSON string.
pub fn to_json_string(script: &Script) -> serde_json::Result<String> {
    tsql_json::script_to_json_string(script)
}

/// Parses `sql` and marshals the result directly to its reference JSON
/// shape, chaining [`parse_script`] and [`to_json`].
pub fn parse_to_json(sql: &str) -> Result<serde_json::Value, ParserError> {
    parse_script(sql).map(|script| to_json(&script))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_to_json_roundtrips_a_simple_select() {
        let json = parse_to_json("SELECT 1;").expect("parse should succeed");
        let select_elements =
            &json["Batches"][0]["Statements"][0]["QueryExpression"]["SelectElements"];
        assert_eq!(select_elements.as_array().unwrap().len(), 1);
    }

    #[test]
    fn parse_script_surfaces_lenient_recovery_without_panicking() {
        let script = parse_script("SELEC 1; SELECT 2;").expect("lexer-level success");
        assert_eq!(script.batches.len(), 1);
        assert_eq!(script.batches[0].statements.len(), 2);
    }
}
