//! Credential masking for text that may echo request headers or keys.
//!
//! Upstream error bodies sometimes quote the key that was rejected. They are
//! passed through here before being logged or returned to a caller.

use once_cell::sync::Lazy;
use regex::Regex;

/// A named credential pattern.
struct SecretPattern {
    name: &'static str,
    regex: &'static Lazy<Regex>,
}

static OPENAI_PROJECT_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"sk-proj-[A-Za-z0-9_\-]{20,}").unwrap());
static OPENAI_API_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"sk-[A-Za-z0-9]{20,}").unwrap());
static BEARER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)bearer\s+[A-Za-z0-9\-_.~+/]{20,}=*").unwrap());
static GENERIC_API_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(api_key|apikey|api-key)\s*[=:]\s*['"]?([A-Za-z0-9_\-]{20,})['"]?"#).unwrap()
});

// Project keys first so the plain `sk-` pattern does not claim their prefix.
static PATTERNS: &[SecretPattern] = &[
    SecretPattern {
        name: "openai_project_key",
        regex: &OPENAI_PROJECT_KEY,
    },
    SecretPattern {
        name: "openai_api_key",
        regex: &OPENAI_API_KEY,
    },
    SecretPattern {
        name: "bearer_token",
        regex: &BEARER_TOKEN,
    },
    SecretPattern {
        name: "generic_api_key",
        regex: &GENERIC_API_KEY,
    },
];

/// Replace every recognised credential with a `:: REDACTED:<kind>` marker.
pub fn redact_secrets(text: &str) -> String {
    let mut redacted = text.to_string();
    for pattern in PATTERNS {
        let marker = format!(":: REDACTED:{}", pattern.name);
        redacted = pattern
            .regex
            .replace_all(&redacted, marker.as_str())
            .into_owned();
    }
    redacted
}
