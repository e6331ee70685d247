use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Expand `{{ env.VAR }}` placeholders in a raw TOML string
///
/// `{{ env.VAR | default("fallback") }}` substitutes the fallback when the
/// variable is unset. Lines starting with `#` are left untouched.
pub fn expand_env(input: &str) -> Result<String, String> {
    expand_with(input, |name| std::env::var(name).ok())
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
    })
}

fn expand_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<String, String> {
    let mut lines = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut failure = None;

        let expanded = placeholder().replace_all(line, |captures: &Captures<'_>| {
            let key = &captures[1];
            let fallback = captures.get(2).map(|m| m.as_str());

            let Some(name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
                failure.get_or_insert_with(|| format!("only variables scoped with 'env.' are supported: `{key}`"));
                return String::new();
            };

            match (lookup(name), fallback) {
                (Some(value), _) => value,
                (None, Some(fallback)) => fallback.to_string(),
                (None, None) => {
                    failure.get_or_insert_with(|| format!("environment variable not found: `{name}`"));
                    String::new()
                }
            }
        });

        if let Some(message) = failure {
            return Err(message);
        }

        lines.push(expanded.into_owned());
    }

    let mut output = lines.join("\n");
    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}
