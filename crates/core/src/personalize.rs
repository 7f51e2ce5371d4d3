//! Message personalization.
//!
//! Templates use `{{placeholder}}` tokens. Two placeholders are built in
//! (`{{name}}`, `{{points}}`); campaigns may supply any number of extra
//! placeholder/value pairs. Substitution is a literal, single pass per
//! key: no escaping, no nesting, no loops.

/// Render a campaign template for one recipient.
///
/// `variables` is the campaign's free-form placeholder map (a JSON
/// object). String values are substituted verbatim; other scalar values
/// use their JSON rendering. Non-object `variables` documents are
/// ignored.
pub fn render_message(
    template: &str,
    recipient_name: &str,
    points_balance: i64,
    variables: Option<&serde_json::Value>,
) -> String {
    let mut rendered = template.replace("{{name}}", recipient_name);
    rendered = rendered.replace("{{points}}", &points_balance.to_string());

    if let Some(serde_json::Value::Object(map)) = variables {
        for (key, value) in map {
            let token = format!("{{{{{key}}}}}");
            let replacement = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            rendered = rendered.replace(&token, &replacement);
        }
    }

    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn substitutes_builtin_placeholders() {
        let out = render_message(
            "Hello {{name}}, you have {{points}} points",
            "Ana",
            120,
            None,
        );
        assert_eq!(out, "Hello Ana, you have 120 points");
    }

    #[test]
    fn substitutes_campaign_variables() {
        let vars = json!({ "reward": "free dessert", "code": "SWEET10" });
        let out = render_message(
            "{{name}}: claim your {{reward}} with code {{code}}",
            "Luis",
            0,
            Some(&vars),
        );
        assert_eq!(out, "Luis: claim your free dessert with code SWEET10");
    }

    #[test]
    fn numeric_variables_render_as_json() {
        let vars = json!({ "discount": 15 });
        let out = render_message("Save {{discount}}%", "x", 0, Some(&vars));
        assert_eq!(out, "Save 15%");
    }

    #[test]
    fn idempotent_without_matching_placeholders() {
        let template = "Fixed announcement with no tokens";
        let out = render_message(template, "Ana", 120, Some(&json!({ "k": "v" })));
        assert_eq!(out, template);
    }

    #[test]
    fn ignores_non_object_variables() {
        let out = render_message("Hi {{name}}", "Ana", 0, Some(&json!(["not", "a", "map"])));
        assert_eq!(out, "Hi Ana");
    }
}
