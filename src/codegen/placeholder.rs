//! Bind-parameter placeholders for provider-rendered WHERE clauses
//!
//! The generated `applyWhere` method formats these patterns with
//! `String.format` at runtime, so the patterns are a contract with the
//! MyBatis parameter parser and must stay byte-for-byte stable. The same
//! shapes are produced directly by [`PlaceholderStyle`] for the runtime
//! model.

/// The six pattern variables declared by the generated `applyWhere`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phrase {
    Single,
    SingleTypeHandled,
    Between,
    BetweenTypeHandled,
    ListItem,
    ListItemTypeHandled,
}

pub const ALL_PHRASES: [Phrase; 6] = [
    Phrase::Single,
    Phrase::SingleTypeHandled,
    Phrase::Between,
    Phrase::BetweenTypeHandled,
    Phrase::ListItem,
    Phrase::ListItemTypeHandled,
];

impl Phrase {
    /// Local variable name in the generated method
    pub fn variable(self) -> &'static str {
        match self {
            Phrase::Single => "parmPhrase1",
            Phrase::SingleTypeHandled => "parmPhrase1_th",
            Phrase::Between => "parmPhrase2",
            Phrase::BetweenTypeHandled => "parmPhrase2_th",
            Phrase::ListItem => "parmPhrase3",
            Phrase::ListItemTypeHandled => "parmPhrase3_th",
        }
    }

    /// `String.format` pattern for this phrase
    pub fn pattern(self, include_example_phrase: bool) -> String {
        let p = prefix(include_example_phrase);
        match self {
            Phrase::Single => format!("%s #{{{p}oredCriteria[%d].allCriteria[%d].value}}"),
            Phrase::SingleTypeHandled => {
                format!("%s #{{{p}oredCriteria[%d].allCriteria[%d].value,typeHandler=%s}}")
            }
            Phrase::Between => format!(
                "%s #{{{p}oredCriteria[%d].allCriteria[%d].value}} and #{{{p}oredCriteria[%d].allCriteria[%d].secondValue}}"
            ),
            Phrase::BetweenTypeHandled => format!(
                "%s #{{{p}oredCriteria[%d].allCriteria[%d].value,typeHandler=%s}} and #{{{p}oredCriteria[%d].allCriteria[%d].secondValue,typeHandler=%s}}"
            ),
            Phrase::ListItem => format!("#{{{p}oredCriteria[%d].allCriteria[%d].value[%d]}}"),
            Phrase::ListItemTypeHandled => {
                format!("#{{{p}oredCriteria[%d].allCriteria[%d].value[%d],typeHandler=%s}}")
            }
        }
    }
}

fn prefix(include_example_phrase: bool) -> &'static str {
    if include_example_phrase {
        "example."
    } else {
        ""
    }
}

fn type_handler_suffix(type_handler: Option<&str>) -> String {
    match type_handler {
        Some(th) => format!(",typeHandler={}", th),
        None => String::new(),
    }
}

/// Renders placeholders addressed by group index `i`, condition index `j`
/// and list position `k`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaceholderStyle {
    /// Update-by-example statements wrap the example in a parameter map
    pub include_example_phrase: bool,
}

impl PlaceholderStyle {
    pub fn new(include_example_phrase: bool) -> Self {
        Self {
            include_example_phrase,
        }
    }

    fn reference(&self, i: usize, j: usize, field: &str, type_handler: Option<&str>) -> String {
        format!(
            "#{{{}oredCriteria[{}].allCriteria[{}].{}{}}}",
            prefix(self.include_example_phrase),
            i,
            j,
            field,
            type_handler_suffix(type_handler)
        )
    }

    pub fn single(&self, condition: &str, i: usize, j: usize, type_handler: Option<&str>) -> String {
        format!("{} {}", condition, self.reference(i, j, "value", type_handler))
    }

    pub fn between(&self, condition: &str, i: usize, j: usize, type_handler: Option<&str>) -> String {
        format!(
            "{} {} and {}",
            condition,
            self.reference(i, j, "value", type_handler),
            self.reference(i, j, "secondValue", type_handler)
        )
    }

    pub fn list_item(&self, i: usize, j: usize, k: usize, type_handler: Option<&str>) -> String {
        self.reference(i, j, &format!("value[{}]", k), type_handler)
    }
}

/// Helpers for checking rendered text against the Java format patterns
#[cfg(test)]
pub(crate) mod test_support {
    /// Sequential `%s` / `%d` substitution, as `String.format` does it
    pub fn java_format(pattern: &str, args: &[&str]) -> String {
        let mut out = String::new();
        let mut args = args.iter();
        let mut chars = pattern.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch == '%' && matches!(chars.peek(), Some('s') | Some('d')) {
                chars.next();
                out.push_str(args.next().expect("missing format argument"));
            } else {
                out.push(ch);
            }
        }
        assert!(args.next().is_none(), "unused format arguments");
        out
    }
}
