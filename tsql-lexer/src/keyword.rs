//! The fixed, case-insensitive T-SQL keyword table.
//!
//! Modified based on the keyword-table approach in
//! `examples/koushiro-usql/usql-core/src/ansi/keyword.rs`, collapsed from a
//! per-dialect generic table down to the single fixed table a single-dialect
//! parser needs.

/// Defines the `Keyword` enum together with a `KEYWORDS` table mapping the
/// uppercased spelling of each entry back to its variant.
///
/// **NOTE**: entries should stay roughly alphabetical; lookup is linear over
/// `KEYWORDS`, which is fine for a table this size and keeps the macro simple.
macro_rules! define_keywords {
    ($($keyword:ident),* $(,)?) => {
        /// All recognized T-SQL keywords, spelled as their canonical
        /// (uppercase) form. Case-insensitive matching happens in
        /// [`Keyword::from_str`].
        #[allow(non_camel_case_types)]
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Keyword {
            $($keyword),*
        }

        impl Keyword {
            /// Looks up a keyword by its textual spelling, case-insensitively.
            /// Returns `None` for any word that is not a reserved T-SQL keyword
            /// (it remains a plain identifier).
            pub fn from_str(word: &str) -> Option<Keyword> {
                $(
                    if word.eq_ignore_ascii_case(stringify!($keyword)) {
                        return Some(Keyword::$keyword);
                    }
                )*
                None
            }

            /// The canonical uppercase spelling of the keyword.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Keyword::$keyword => stringify!($keyword)),*
                }
            }
        }
    };
}

define_keywords! {
    ABORT, ABSENT, ABSOLUTE, ACTION, ADD, AFTER, ALL, ALTER, AND, ANY, APPLY,
    ARRAY, AS, ASC, ASSEMBLY, AT, AUTHORIZATION, AVAILABILITY, BACKUP, BEGIN,
    BETWEEN, BREAK, BULK, BY, CASCADE, CASE, CAST, CATALOG, CHECK, CHECKPOINT,
    CLASS, CLOSE, CLUSTERED, COLLATE, COLUMN, COLUMNSTORE, COMMIT,
    COMPRESSION, CONSTRAINT, CONTINUE, CONTRACT, CONVERT, CREATE, CROSS,
    CUID, CURRENT, CURSOR,
    DATA, DATABASE, DEALLOCATE, DECLARE, DEFAULT, DELAY, DELETE, DENSE_RANK,
    DENY, DESC, DISABLE, DISTINCT, DISTRIBUTION, DROP, DURABILITY, DYNAMIC,
    EDGE, ELSE, ENCRYPTION, END, ESCAPE, EVENT, EXCEPT, EXEC, EXECUTE, EXISTS,
    EXTERNAL, FEDERATED, FETCH, FILE, FILEGROUP, FILESTREAM, FILETABLE,
    FILTER, FIRST, FOLLOWING, FOR, FOREIGN, FORWARD_ONLY, FROM, FULL,
    FULLTEXT, FUNCTION, GLOBAL, GO, GOTO, GRANT, GROUP, HASH, HAVING, HEAP,
    IDENTITY, IF, IGNORE, IIF, IN, INDEX, INNER, INSERT, INSTEAD, INTERSECT,
    INTO, IS, JOIN, KEY, KEYSET, KILL, LAST, LEFT, LIKE, LOCAL, LOGIN, MATCH,
    MATCHED, MAX, MEMORY_OPTIMIZED, MERGE, MESSAGE, MINUTES, NATIVE_COMPILATION,
    NEXT, NO, NODE, NONCLUSTERED, NOT, NULL, NULLS, OBJECT, OF, OFF, OFFSET, ON,
    ONLINE, OPEN, OPENJSON, OPENQUERY, OPENROWSET, OPENXML, OPTION, OR, ORDER,
    OUTER, OUTPUT, OVER, PARSE, PARTITION, PAUSE, PERIOD, PIVOT, POLICY,
    PRECEDING, PRIMARY, PRINT, PRIOR, PROC, PROCEDURE, PUBLIC, QUEUE, RANGE,
    READ_ONLY, REBUILD, RECONFIGURE, REFERENCES, RELATIVE, REMOTE, REORGANIZE,
    REPLICATION, RESPECT, RESTORE, RESUME, RETURN, RETURNS, REVOKE, RIGHT, ROLE,
    ROLLBACK, ROUTE, ROW, ROWGUIDCOL, ROWS, SAVE, SCHEMA, SCHEMABINDING,
    SCROLL, SECURITY, SELECT, SEQUENCE, SERVER, SERVICE, SESSION, SET,
    SHUTDOWN, SOME, SOURCE, STATIC, STATISTICS, SYMMETRIC, SYSTEM_TIME, TABLE,
    TARGET, TEXTIMAGE_ON, THEN, THROW, TIME, TO, TOP, TRAN, TRANSACTION,
    TRIGGER, TRUNCATE, TRY, TRY_CAST, TRY_CONVERT, TRY_PARSE, TYPE, UNBOUNDED,
    UNION, UNIQUE, UNPIVOT, UPDATE, USE, USER, USING, VALUE, VALUES, VIEW,
    WAITFOR, WHEN, WHERE, WHILE, WITH, WITHIN, WITHOUT, WORK, WRAPPER, XML,
    ZONE,
}
