use std::collections::HashMap;

/// Field names title-cased when no configuration overrides them.
pub const DEFAULT_TITLE_CASE_FIELDS: [&str; 3] = ["city", "country", "state"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Trim,
    TitleCase,
}

impl FieldRule {
    pub fn apply(self, value: &str) -> String {
        let trimmed = value.trim();
        match self {
            FieldRule::Trim => trimmed.to_string(),
            FieldRule::TitleCase => title_case(trimmed),
        }
    }
}

/// Normalization rule table keyed by lower-cased field name. Fields without
/// an entry are trimmed only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationRules {
    rules: HashMap<String, FieldRule>,
}

impl NormalizationRules {
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    pub fn with_title_case_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Self::empty();
        for field in fields {
            rules.set(field.as_ref(), FieldRule::TitleCase);
        }
        rules
    }

    pub fn set(&mut self, field: &str, rule: FieldRule) {
        self.rules.insert(field.to_lowercase(), rule);
    }

    pub fn rule_for(&self, field: &str) -> FieldRule {
        self.rules
            .get(&field.to_lowercase())
            .copied()
            .unwrap_or(FieldRule::Trim)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for NormalizationRules {
    fn default() -> Self {
        Self::with_title_case_fields(DEFAULT_TITLE_CASE_FIELDS)
    }
}

/// Uppercases the first letter of every run of letters and lowercases the rest.
/// Any non-letter starts a new word, so `o'neil` becomes `O'Neil`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("NEW YORK"), "New York");
        assert_eq!(title_case("los angeles"), "Los Angeles");
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case("winston-salem"), "Winston-Salem");
        assert_eq!(title_case("City12"), "City12");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_default_rules_cover_location_fields_case_insensitively() {
        let rules = NormalizationRules::default();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules.rule_for("city"), FieldRule::TitleCase);
        assert_eq!(rules.rule_for("Country"), FieldRule::TitleCase);
        assert_eq!(rules.rule_for("STATE"), FieldRule::TitleCase);
        assert_eq!(rules.rule_for("name"), FieldRule::Trim);
        assert_eq!(rules.rule_for("unknown"), FieldRule::Trim);
    }

    #[test]
    fn test_custom_rule_table() {
        let mut rules = NormalizationRules::with_title_case_fields(["Region"]);
        assert_eq!(rules.rule_for("region"), FieldRule::TitleCase);
        assert_eq!(rules.rule_for("city"), FieldRule::Trim);

        rules.set("region", FieldRule::Trim);
        assert_eq!(rules.rule_for("REGION"), FieldRule::Trim);
    }

    #[test]
    fn test_rules_apply_trim_before_casing() {
        assert_eq!(FieldRule::Trim.apply("  JOHN DOE "), "JOHN DOE");
        assert_eq!(FieldRule::TitleCase.apply("  miami  "), "Miami");
    }
}
