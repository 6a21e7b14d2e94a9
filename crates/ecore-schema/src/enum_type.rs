///
/// EnumId
/// Handle into `MetaRegistry::enums`.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EnumId(pub(crate) usize);

///
/// EnumLiteral
/// One member of an `EEnum`: an ordinal and a name.
///
/// Names starting with a digit are not valid Rust-ish identifiers, so
/// `EnumDef::new` prefixes them with `_` on creation.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnumLiteral {
    pub ordinal: u32,
    pub name: String,
}

///
/// EnumDef
/// A finite, ordered sequence of `EnumLiteral`s. Default literal is the
/// first unless overridden at construction.
///

pub struct EnumDef {
    pub name: String,
    pub literals: Vec<EnumLiteral>,
    pub default_ordinal: u32,
}

impl EnumDef {
    #[must_use]
    pub fn new(name: impl Into<String>, literal_names: &[&str]) -> Self {
        let literals = literal_names
            .iter()
            .enumerate()
            .map(|(i, raw)| EnumLiteral {
                ordinal: i as u32,
                name: sanitize_literal_name(raw),
            })
            .collect();

        Self {
            name: name.into(),
            literals,
            default_ordinal: 0,
        }
    }

    /// Override the default literal by name; no-op if `name` is not a member.
    #[must_use]
    pub fn with_default(mut self, name: &str) -> Self {
        if let Some(l) = self.literal_by_name(name) {
            self.default_ordinal = l.ordinal;
        }
        self
    }

    #[must_use]
    pub fn literal_by_name(&self, name: &str) -> Option<&EnumLiteral> {
        self.literals.iter().find(|l| l.name == name)
    }

    #[must_use]
    pub fn literal_by_ordinal(&self, ordinal: u32) -> Option<&EnumLiteral> {
        self.literals.iter().find(|l| l.ordinal == ordinal)
    }

    #[must_use]
    pub fn default_literal(&self) -> &EnumLiteral {
        self.literal_by_ordinal(self.default_ordinal)
            .expect("default_ordinal always indexes a literal registered at construction")
    }

    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.literal_by_name(name).is_some()
    }

    #[must_use]
    pub fn contains_ordinal(&self, ordinal: u32) -> bool {
        self.literal_by_ordinal(ordinal).is_some()
    }
}

fn sanitize_literal_name(raw: &str) -> String {
    if raw.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{raw}")
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_leading_literal_is_prefixed() {
        let e = EnumDef::new("Weird", &["1ST", "SECOND"]);
        assert_eq!(e.literals[0].name, "_1ST");
        assert!(e.contains_name("_1ST"));
    }

    #[test]
    fn default_literal_is_first_unless_overridden() {
        let e = EnumDef::new("Color", &["RED", "GREEN", "BLUE"]);
        assert_eq!(e.default_literal().name, "RED");

        let e = e.with_default("BLUE");
        assert_eq!(e.default_literal().name, "BLUE");
    }

    #[test]
    fn membership_by_name_and_ordinal() {
        let e = EnumDef::new("Color", &["RED", "GREEN", "BLUE"]);
        assert!(e.contains_name("RED"));
        assert!(!e.contains_name("MAUVE"));
        assert!(e.contains_ordinal(2));
        assert!(!e.contains_ordinal(3));
    }
}
