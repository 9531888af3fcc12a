use std::rc::Rc;

/// How an identifier was quoted in source text (spec §3, §6).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuoteType {
    NotQuoted,
    SquareBracket,
    DoubleQuote,
    Backtick,
}

/// A single identifier, decomposed into its unquoted value and quote style
/// (spec §3).
///
/// `Identifier` nodes are reference-counted (`Rc`) rather than owned
/// outright, because [`SchemaObjectName`] needs two independent AST slots
/// (a named field and a position in `identifiers`) to be able to point at
/// *the same* identifier object. The JSON marshaller tells the two paths
/// apart by `Rc` pointer identity (spec §9) and emits a `$ref` for whichever
/// path reaches a given identifier second.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Identifier {
    pub value: String,
    pub quote_type: QuoteType,
}

impl Identifier {
    pub fn new(value: impl Into<String>, quote_type: QuoteType) -> Rc<Identifier> {
        Rc::new(Identifier {
            value: value.into(),
            quote_type,
        })
    }

    pub fn plain(value: impl Into<String>) -> Rc<Identifier> {
        Identifier::new(value, QuoteType::NotQuoted)
    }
}

/// An ordered list of identifiers making up a dotted name, e.g. `a.b.c`
/// (spec §3). `count` mirrors `identifiers.len()` per the reference shape
/// and per the invariant in spec §8.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiPartIdentifier {
    pub identifiers: Vec<Rc<Identifier>>,
}

impl MultiPartIdentifier {
    pub fn new(identifiers: Vec<Rc<Identifier>>) -> Self {
        MultiPartIdentifier { identifiers }
    }

    pub fn count(&self) -> usize {
        self.identifiers.len()
    }
}

/// A 4-part object name (`server.database.schema.base`), with both named
/// slots and a parallel flat list referencing the same identifier objects
/// (spec §3). Per spec §8: for `count >= 2`, the last `count` entries of
/// `identifiers` align with `base, schema, database, server` in that
/// (reverse) order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchemaObjectName {
    pub server: Option<Rc<Identifier>>,
    pub database: Option<Rc<Identifier>>,
    pub schema: Option<Rc<Identifier>>,
    pub base: Option<Rc<Identifier>>,
    /// Every identifier that appeared in the source, left-to-right, sharing
    /// `Rc` identity with the named slot it also fills (if any).
    pub identifiers: Vec<Rc<Identifier>>,
}

impl SchemaObjectName {
    /// Builds a `SchemaObjectName` from the parts as they appeared in source
    /// order (1 to 4 entries: `base`, `schema.base`, `database.schema.base`,
    /// or `server.database.schema.base`). A named slot is `None` only when
    /// `parts` is shorter than 4 entries, i.e. the slot has no corresponding
    /// dot-separated component at all. Empty components produced by leading
    /// dots (e.g. `..t1`) still supply an entry in `parts` — an
    /// empty-valued `Identifier` — so they fill their named slot with
    /// `Some(<empty Identifier>)` and still occupy a position in
    /// `identifiers`, matching `GRANT`'s `ON ..t1` handling (spec §4.4).
    pub fn new(parts: Vec<Rc<Identifier>>) -> Self {
        let identifiers = parts.clone();
        let mut rev = parts.into_iter().rev();
        let base = rev.next();
        let schema = rev.next();
        let database = rev.next();
        let server = rev.next();
        SchemaObjectName {
            server,
            database,
            schema,
            base,
            identifiers,
        }
    }

    pub fn count(&self) -> usize {
        self.identifiers.len()
    }
}
