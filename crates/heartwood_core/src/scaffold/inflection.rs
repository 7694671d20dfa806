//! Word inflection used to derive file stems and type names.
//!
//! Rules follow the common English inflector tables: singular rules are
//! tried most-specific first and the first matching rule wins.

use once_cell::sync::Lazy;
use regex::Regex;

static ACRONYM_BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z\d]+)([A-Z][a-z])").expect("valid acronym regex"));
static CAMEL_BOUNDARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("valid camel regex"));
static LEADING_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z\d]*").expect("valid leading word regex"));
static SEGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:_|(/))([a-z\d]*)").expect("valid segment regex"));
static UNCOUNTABLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:equipment|information|rice|money|species|series|fish|sheep|jeans|police)\z",
    )
    .expect("valid uncountable regex")
});

// Irregulars first, then regular rules from most to least specific.
const SINGULAR_RULES: &[(&str, &str)] = &[
    (r"(?i)(z)ombies$", "${1}ombie"),
    (r"(?i)(z)ombie$", "${1}ombie"),
    (r"(?i)(m)oves$", "${1}ove"),
    (r"(?i)(m)ove$", "${1}ove"),
    (r"(?i)(s)exes$", "${1}ex"),
    (r"(?i)(s)ex$", "${1}ex"),
    (r"(?i)(c)hildren$", "${1}hild"),
    (r"(?i)(c)hild$", "${1}hild"),
    (r"(?i)(m)en$", "${1}an"),
    (r"(?i)(m)an$", "${1}an"),
    (r"(?i)(p)eople$", "${1}erson"),
    (r"(?i)(p)erson$", "${1}erson"),
    (r"(?i)(database)s$", "${1}"),
    (r"(?i)(quiz)zes$", "${1}"),
    (r"(?i)(matr)ices$", "${1}ix"),
    (r"(?i)(vert|ind)ices$", "${1}ex"),
    (r"(?i)^(ox)en", "${1}"),
    (r"(?i)(alias|status)(es)?$", "${1}"),
    (r"(?i)(octop|vir)(us|i)$", "${1}us"),
    (r"(?i)^(a)x[ie]s$", "${1}xis"),
    (r"(?i)(cris|test)(is|es)$", "${1}is"),
    (r"(?i)(shoe)s$", "${1}"),
    (r"(?i)(o)es$", "${1}"),
    (r"(?i)(bus)(es)?$", "${1}"),
    (r"(?i)^(m|l)ice$", "${1}ouse"),
    (r"(?i)(x|ch|ss|sh)es$", "${1}"),
    (r"(?i)(m)ovies$", "${1}ovie"),
    (r"(?i)(s)eries$", "${1}eries"),
    (r"(?i)([^aeiouy]|qu)ies$", "${1}y"),
    (r"(?i)([lr])ves$", "${1}f"),
    (r"(?i)(tive)s$", "${1}"),
    (r"(?i)(hive)s$", "${1}"),
    (r"(?i)([^f])ves$", "${1}fe"),
    (
        r"(?i)((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$",
        "${1}sis",
    ),
    (r"(?i)(^analy)(sis|ses)$", "${1}sis"),
    (r"(?i)([ti])a$", "${1}um"),
    (r"(?i)(n)ews$", "${1}ews"),
    (r"(?i)(ss)$", "${1}"),
    (r"(?i)s$", ""),
];

static SINGULARS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    SINGULAR_RULES
        .iter()
        .map(|(pattern, replacement)| {
            (
                Regex::new(pattern).expect("valid singular rule"),
                *replacement,
            )
        })
        .collect()
});

/// Converts `CamelCase`, `Name::Spaced` and dashed words to `snake/case`.
pub fn underscore(word: &str) -> String {
    let word = word.replace("::", "/");
    let word = ACRONYM_BOUNDARY_RE.replace_all(&word, "${1}_${2}");
    let word = CAMEL_BOUNDARY_RE.replace_all(&word, "${1}_${2}");
    word.replace('-', "_").to_lowercase()
}

/// Converts `snake_case/paths` to `CamelCase::Paths`.
pub fn camelize(term: &str) -> String {
    let head = LEADING_WORD_RE.replace(term, |caps: &regex::Captures<'_>| capitalize(&caps[0]));
    let body = SEGMENT_RE.replace_all(&head, |caps: &regex::Captures<'_>| {
        let separator = caps.get(1).map_or("", |m| m.as_str());
        format!("{separator}{}", capitalize(&caps[2]))
    });
    body.replace('/', "::")
}

/// Singularizes the trailing word of `word`.
///
/// Uncountable words are returned unchanged.
pub fn singularize(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLE_RE.is_match(word) {
        return word.to_string();
    }
    SINGULARS
        .iter()
        .find(|(rule, _)| rule.is_match(word))
        .map(|(rule, replacement)| rule.replace(word, *replacement).into_owned())
        .unwrap_or_else(|| word.to_string())
}

/// Singularizes and camelizes the part of `name` after its last `.`.
pub fn classify(name: &str) -> String {
    let tail = name.rsplit('.').next().unwrap_or(name);
    camelize(&singularize(tail))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
