//! Language codes, display names and flag markers.

/// Known language: (code, English name, flag marker).
const LANGUAGES: &[(&str, &str, &str)] = &[
    ("en", "English", "🇬🇧"),
    ("fr", "French", "🇫🇷"),
    ("es", "Spanish", "🇪🇸"),
    ("de", "German", "🇩🇪"),
    ("pt", "Portuguese", "🇵🇹"),
    ("it", "Italian", "🇮🇹"),
    ("ru", "Russian", "🇷🇺"),
    ("zh", "Chinese", "🇨🇳"),
    ("ja", "Japanese", "🇯🇵"),
    ("ko", "Korean", "🇰🇷"),
    ("nl", "Dutch", "🇳🇱"),
    ("pl", "Polish", "🇵🇱"),
    ("tr", "Turkish", "🇹🇷"),
    ("uk", "Ukrainian", "🇺🇦"),
    ("ar", "Arabic", "🇸🇦"),
];

/// Marker used for codes missing from the table.
pub const UNKNOWN_FLAG: &str = "🌐";

/// Sentinel source code asking the remote service to infer the language.
pub const AUTO: &str = "auto";

/// Primary subtag of a language code, lower-cased (`"en-US"` -> `"en"`).
pub fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// True when two codes name the same language, ignoring case and region.
pub fn same_language(a: &str, b: &str) -> bool {
    let a = primary_subtag(a);
    !a.is_empty() && a == primary_subtag(b)
}

pub fn display_name(code: &str) -> Option<&'static str> {
    let code = primary_subtag(code);
    LANGUAGES
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, name, _)| *name)
}

pub fn flag(code: &str) -> &'static str {
    let code = primary_subtag(code);
    LANGUAGES
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, _, flag)| *flag)
        .unwrap_or(UNKNOWN_FLAG)
}

/// `Spanish (es)` for known codes, the bare code otherwise.
pub fn describe(code: &str) -> String {
    match display_name(code) {
        Some(name) => format!("{} ({})", name, code),
        None => code.to_string(),
    }
}

/// Result of a detect call: the top guess.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub language: String,
    pub confidence: Option<f64>,
}

impl DetectionResult {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Result of a translate call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub text: String,
}

impl TranslationResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
