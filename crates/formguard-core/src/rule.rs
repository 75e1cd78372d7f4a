//! Validation rules.
//!
//! A [`Rule`] is a pure predicate over a field value. Rules are declared in
//! text form (`"required"`, `"minLength:2"`, ...) in configuration files and
//! parsed once into this enum when the form spec is built.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+]?[1-9][0-9]{0,15}$").expect("phone pattern is valid"));

static PHONE_SEPARATORS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-()]").expect("separator pattern is valid"));

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ\s]+$").expect("name pattern is valid")
});

/// Minimum number of characters of a phone number once separators are
/// stripped.
pub const MIN_PHONE_LENGTH: usize = 7;

/// The kind of a rule, used as the key of its error message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// `required`
    Required,
    /// `minLength`
    MinLength,
    /// `maxLength`
    MaxLength,
    /// `email`
    Email,
    /// `phone`
    Phone,
    /// `name`
    Name,
    /// Any kind the engine does not recognize.
    Custom(String),
}

impl RuleKind {
    /// Parses a kind name. Unrecognized names become [`RuleKind::Custom`].
    pub fn parse(name: &str) -> Self {
        match name {
            "required" => Self::Required,
            "minLength" => Self::MinLength,
            "maxLength" => Self::MaxLength,
            "email" => Self::Email,
            "phone" => Self::Phone,
            "name" => Self::Name,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Returns the kind name as written in configuration.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Name => "name",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RuleKind {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

/// A single validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Value must not be empty.
    Required,
    /// Value must have at least this many characters.
    MinLength(usize),
    /// Value must have at most this many characters.
    MaxLength(usize),
    /// Value must look like an email address.
    Email,
    /// Value must look like a phone number. Empty values pass.
    Phone,
    /// Value may only contain Latin letters, Spanish accented vowels, ñ and
    /// spaces.
    NamePattern,
    /// A rule kind the engine does not know. Always passes.
    Custom {
        /// Kind name as written.
        kind: String,
        /// Parameter as written, if any.
        param: Option<String>,
    },
}

impl Rule {
    /// Parses a rule from its text form, e.g. `"maxLength:50"`.
    ///
    /// `field` is only used to give errors context.
    pub fn parse(field: &str, text: &str) -> Result<Self, ConfigError> {
        let text = text.trim();
        let (kind, param) = match text.split_once(':') {
            Some((kind, param)) => (kind.trim(), Some(param.trim())),
            None => (text, None),
        };

        if kind.is_empty() {
            return Err(ConfigError::EmptyRule {
                field: field.to_string(),
            });
        }

        let rule = match RuleKind::parse(kind) {
            RuleKind::Required => without_param(field, kind, param, Self::Required)?,
            RuleKind::MinLength => Self::MinLength(parse_length(field, kind, param)?),
            RuleKind::MaxLength => Self::MaxLength(parse_length(field, kind, param)?),
            RuleKind::Email => without_param(field, kind, param, Self::Email)?,
            RuleKind::Phone => without_param(field, kind, param, Self::Phone)?,
            RuleKind::Name => without_param(field, kind, param, Self::NamePattern)?,
            RuleKind::Custom(kind) => Self::Custom {
                kind,
                param: param.map(str::to_string),
            },
        };

        Ok(rule)
    }

    /// Returns the kind of this rule.
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Required => RuleKind::Required,
            Self::MinLength(_) => RuleKind::MinLength,
            Self::MaxLength(_) => RuleKind::MaxLength,
            Self::Email => RuleKind::Email,
            Self::Phone => RuleKind::Phone,
            Self::NamePattern => RuleKind::Name,
            Self::Custom { kind, .. } => RuleKind::Custom(kind.clone()),
        }
    }

    /// Returns whether the value satisfies this rule.
    ///
    /// Surrounding whitespace is ignored.
    pub fn check(&self, value: &str) -> bool {
        let value = value.trim();
        match self {
            Self::Required => !value.is_empty(),
            Self::MinLength(min) => value.chars().count() >= *min,
            Self::MaxLength(max) => value.chars().count() <= *max,
            Self::Email => EMAIL_RE.is_match(value),
            Self::Phone => is_phone(value),
            Self::NamePattern => NAME_RE.is_match(value),
            Self::Custom { .. } => true,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinLength(n) | Self::MaxLength(n) => write!(f, "{}:{n}", self.kind()),
            Self::Custom {
                kind,
                param: Some(param),
            } => write!(f, "{kind}:{param}"),
            _ => write!(f, "{}", self.kind()),
        }
    }
}

fn parse_length(field: &str, rule: &str, param: Option<&str>) -> Result<usize, ConfigError> {
    match param {
        None | Some("") => Err(ConfigError::MissingParameter {
            field: field.to_string(),
            rule: rule.to_string(),
        }),
        Some(param) => param.parse().map_err(|_| ConfigError::InvalidParameter {
            field: field.to_string(),
            rule: rule.to_string(),
            param: param.to_string(),
        }),
    }
}

fn without_param(
    field: &str,
    rule: &str,
    param: Option<&str>,
    parsed: Rule,
) -> Result<Rule, ConfigError> {
    match param {
        None => Ok(parsed),
        Some(param) => Err(ConfigError::UnexpectedParameter {
            field: field.to_string(),
            rule: rule.to_string(),
            param: param.to_string(),
        }),
    }
}

fn is_phone(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    let stripped = PHONE_SEPARATORS_RE.replace_all(value, "");
    PHONE_RE.is_match(&stripped) && stripped.chars().count() >= MIN_PHONE_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_rules() {
        assert_eq!(Rule::parse("f", "required").unwrap(), Rule::Required);
        assert_eq!(Rule::parse("f", "email").unwrap(), Rule::Email);
        assert_eq!(Rule::parse("f", "phone").unwrap(), Rule::Phone);
        assert_eq!(Rule::parse("f", "name").unwrap(), Rule::NamePattern);
    }

    #[test]
    fn test_parse_length_rules() {
        assert_eq!(Rule::parse("f", "minLength:2").unwrap(), Rule::MinLength(2));
        assert_eq!(
            Rule::parse("f", " maxLength : 50 ").unwrap(),
            Rule::MaxLength(50)
        );
    }

    #[test]
    fn test_parse_length_errors() {
        assert!(matches!(
            Rule::parse("nombre", "minLength"),
            Err(ConfigError::MissingParameter { .. })
        ));
        assert!(matches!(
            Rule::parse("nombre", "minLength:"),
            Err(ConfigError::MissingParameter { .. })
        ));
        assert!(matches!(
            Rule::parse("nombre", "maxLength:abc"),
            Err(ConfigError::InvalidParameter { ref param, .. }) if param == "abc"
        ));
        assert!(matches!(
            Rule::parse("nombre", "maxLength:-1"),
            Err(ConfigError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_parse_unexpected_parameter() {
        assert!(matches!(
            Rule::parse("email", "email:strict"),
            Err(ConfigError::UnexpectedParameter { .. })
        ));
    }

    #[test]
    fn test_parse_empty_rule() {
        assert!(matches!(
            Rule::parse("f", "  "),
            Err(ConfigError::EmptyRule { .. })
        ));
        assert!(matches!(
            Rule::parse("f", ":3"),
            Err(ConfigError::EmptyRule { .. })
        ));
    }

    #[test]
    fn test_parse_custom_rule() {
        let rule = Rule::parse("f", "postalCode:ES").unwrap();
        assert_eq!(
            rule,
            Rule::Custom {
                kind: "postalCode".to_string(),
                param: Some("ES".to_string()),
            }
        );
        assert_eq!(rule.kind(), RuleKind::Custom("postalCode".to_string()));
        assert!(rule.check(""));
        assert!(rule.check("anything at all"));
    }

    #[test]
    fn test_display_matches_config_form() {
        for text in ["required", "minLength:2", "maxLength:500", "email", "phone", "name", "x:y"] {
            assert_eq!(Rule::parse("f", text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_required() {
        assert!(Rule::Required.check("a"));
        assert!(!Rule::Required.check(""));
        assert!(!Rule::Required.check(" \t\n"));
    }

    #[test]
    fn test_length_bounds_are_inclusive() {
        assert!(Rule::MinLength(2).check("ab"));
        assert!(!Rule::MinLength(2).check("a"));
        assert!(Rule::MaxLength(3).check("abc"));
        assert!(!Rule::MaxLength(3).check("abcd"));
        // Surrounding whitespace does not count.
        assert!(Rule::MaxLength(3).check("  abc  "));
        assert!(!Rule::MinLength(2).check(" a "));
    }

    #[test]
    fn test_length_counts_characters() {
        assert!(Rule::MaxLength(4).check("José"));
        assert!(Rule::MinLength(4).check("Íñig"));
    }

    #[test]
    fn test_email() {
        assert!(Rule::Email.check("a@b.co"));
        assert!(Rule::Email.check("user.name@mail.example.com"));
        assert!(!Rule::Email.check("not-an-email"));
        assert!(!Rule::Email.check("a@b"));
        assert!(!Rule::Email.check("a b@c.com"));
        assert!(!Rule::Email.check("a@@b.com"));
        assert!(!Rule::Email.check("@b.com"));
    }

    #[test]
    fn test_phone() {
        assert!(Rule::Phone.check(""));
        assert!(Rule::Phone.check("(555) 123-4567"));
        assert!(Rule::Phone.check("+34 612 345 678"));
        assert!(Rule::Phone.check("1234567"));
        assert!(!Rule::Phone.check("123"));
        assert!(!Rule::Phone.check("123456"));
        assert!(!Rule::Phone.check("0123456789"));
        assert!(!Rule::Phone.check("555-CALL-NOW"));
        assert!(!Rule::Phone.check("12345678901234567"));
    }

    #[test]
    fn test_name_pattern() {
        assert!(Rule::NamePattern.check("Ana"));
        assert!(Rule::NamePattern.check("José Núñez"));
        assert!(Rule::NamePattern.check("ÁNGELA MUÑOZ"));
        assert!(!Rule::NamePattern.check("J0e"));
        assert!(!Rule::NamePattern.check("O'Brien"));
        assert!(!Rule::NamePattern.check("Zoë"));
    }
}
