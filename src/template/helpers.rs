//! Render-time helpers available to page templates.
//!
//! - `safeHTML value` writes a string without HTML escaping.
//! - `toJSON value` writes any value as JSON, safe to embed in a `<script>` block.

use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderErrorReason,
};
use serde_json::Value as JsonValue;

pub const SAFE_HTML: &str = "safeHTML";
pub const TO_JSON: &str = "toJSON";

/// Register every helper on `registry`.
pub fn register(registry: &mut Handlebars<'static>) {
    registry.register_helper(SAFE_HTML, Box::new(safe_html));
    registry.register_helper(TO_JSON, Box::new(to_json));
}

fn safe_html(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param = h
        .param(0)
        .ok_or(RenderErrorReason::ParamNotFoundForIndex(SAFE_HTML, 0))?;

    match param.value() {
        JsonValue::Null => {}
        JsonValue::String(s) => out.write(s)?,
        other => out.write(&other.to_string())?,
    }
    Ok(())
}

fn to_json(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param = h
        .param(0)
        .ok_or(RenderErrorReason::ParamNotFoundForIndex(TO_JSON, 0))?;

    let encoded = embeddable_json(param.value())
        .map_err(|e| RenderErrorReason::Other(format!("toJSON: {e}")))?;
    out.write(&encoded)?;
    Ok(())
}

/// Serialize `value` so it cannot terminate an enclosing `<script>` element.
pub fn embeddable_json(value: &JsonValue) -> Result<String, serde_json::Error> {
    let raw = serde_json::to_string(value)?;
    Ok(raw.replace("</", "<\\/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> Handlebars<'static> {
        let mut hb = Handlebars::new();
        register(&mut hb);
        hb
    }

    #[test]
    fn test_safe_html_skips_escaping() {
        let hb = registry();
        let out = hb
            .render_template("{{safeHTML icon}}|{{icon}}", &json!({ "icon": "<b>x</b>" }))
            .unwrap();
        assert_eq!(out, "<b>x</b>|&lt;b&gt;x&lt;/b&gt;");
    }

    #[test]
    fn test_safe_html_null_is_empty() {
        let hb = registry();
        let out = hb.render_template("[{{safeHTML missing}}]", &json!({})).unwrap();
        assert_eq!(out, "[]");
    }

    #[test]
    fn test_to_json_is_raw_and_script_safe() {
        let hb = registry();
        let out = hb
            .render_template(
                "{{toJSON search}}",
                &json!({ "search": [{ "name": "</script>", "prefix": "d" }] }),
            )
            .unwrap();
        assert_eq!(out, r#"[{"name":"<\/script>","prefix":"d"}]"#);
    }
}
