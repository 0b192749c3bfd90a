// Shared prompt fragments and the template renderer.
// Each flow keeps its own templates alongside it (see interview::prompts).

/// Closing instruction appended to every prompt that expects structured output.
pub const JSON_OUTPUT_INSTRUCTION: &str = "\
Respond with the JSON payload only, in exactly the shape shown above. \
Do not add commentary before or after it.";

/// Keeps answer-format jargon out of anything the candidate will read.
pub const NO_FRAMEWORK_NAMING: &str = "\
Never mention an answer framework by name (for example 'STAR method' or 'STAR format') \
in any text the candidate will see.";

/// Substitutes `{name}` placeholders in a single pass.
///
/// Unknown placeholders and any other braces (JSON examples) are left as-is,
/// and substituted values are never rescanned.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let name_len = tail
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(tail.len());
        let name = &tail[..name_len];

        if !name.is_empty() && tail[name_len..].starts_with('}') {
            if let Some((_, value)) = vars.iter().find(|(key, _)| *key == name) {
                out.push_str(value);
                rest = &tail[name_len + 1..];
                continue;
            }
        }

        out.push('{');
        rest = tail;
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_known_placeholders() {
        let out = render_template("Role: {job}. Again: {job}.", &[("job", "Backend Engineer")]);
        assert_eq!(out, "Role: Backend Engineer. Again: Backend Engineer.");
    }

    #[test]
    fn test_render_leaves_json_braces_alone() {
        let template = r#"{"id": 1, "content": "{text}"}"#;
        let out = render_template(template, &[("text", "hi")]);
        assert_eq!(out, r#"{"id": 1, "content": "hi"}"#);
    }

    #[test]
    fn test_render_keeps_unknown_placeholders() {
        assert_eq!(render_template("{missing} {x}", &[("x", "1")]), "{missing} 1");
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let out = render_template(
            "{resume} / {job}",
            &[("resume", "I wrote {job} here"), ("job", "SRE")],
        );
        assert_eq!(out, "I wrote {job} here / SRE");
    }

    #[test]
    fn test_render_handles_trailing_open_brace() {
        assert_eq!(render_template("tail {", &[]), "tail {");
    }
}
