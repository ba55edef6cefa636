//! Render command
//!
//! Usage: pocketlog render <TEMPLATE> [ARGS]... [--prop NAME=VALUE]... [--culture NAME] [--json]

use clap::Args;
use pocketlog_core::{
    log_op_end, log_op_error, log_op_start, Culture, FormatResult, LoggerConfig, PocketError,
    Property, TemplateRegistry, Value,
};
use std::time::Instant;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Message template, e.g. "{user} bought {count:00} items"
    pub template: String,

    /// Positional arguments, bound to placeholders in order
    #[arg(allow_negative_numbers = true)]
    pub args: Vec<String>,

    /// Named property appended to the text (repeatable)
    #[arg(short = 'p', long = "prop", value_name = "NAME=VALUE")]
    pub props: Vec<String>,

    /// Culture for format specs (overrides the configured one)
    #[arg(long)]
    pub culture: Option<String>,

    /// Print text and properties as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute render command
pub fn execute(args: RenderArgs, config: &LoggerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let started = Instant::now();
    log_op_start!("render", template_len = args.template.len());

    match render(&args, config) {
        Ok(result) => {
            log_op_end!(
                "render",
                duration_ms = started.elapsed().as_millis() as u64,
                property_count = result.len()
            );
            if args.json {
                println!("{}", to_json(&result));
            } else {
                println!("{}", result.text());
            }
            Ok(())
        }
        Err(err) => {
            log_op_error!("render", err, duration_ms = started.elapsed().as_millis() as u64);
            Err(err.into())
        }
    }
}

fn render(args: &RenderArgs, config: &LoggerConfig) -> pocketlog_core::Result<FormatResult> {
    let culture = match &args.culture {
        Some(name) => Culture::by_name(name).ok_or_else(|| PocketError::InvalidConfig {
            reason: format!("unknown culture '{}'", name),
        })?,
        None => config.resolve_culture()?,
    };
    let named = args
        .props
        .iter()
        .map(|p| parse_property(p))
        .collect::<pocketlog_core::Result<Vec<_>>>()?;
    let values: Vec<Value> = args.args.iter().map(|a| parse_value(a)).collect();

    let registry = TemplateRegistry::new();
    let template = registry.get_or_create(&args.template);
    Ok(template.render_in(&culture, &values, &named))
}

fn to_json(result: &FormatResult) -> serde_json::Value {
    let properties: Vec<serde_json::Value> = result
        .iter()
        .map(|p| serde_json::json!({ "name": p.name, "value": p.value.to_json() }))
        .collect();
    serde_json::json!({ "text": result.text(), "properties": properties })
}

/// Interpret a shell word as the most specific value it spells.
fn parse_value(raw: &str) -> Value {
    match raw {
        "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Int(i);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => Value::Float(f),
        _ => Value::from(raw),
    }
}

fn parse_property(raw: &str) -> pocketlog_core::Result<Property> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok(Property::new(name, parse_value(value))),
        _ => Err(PocketError::InvalidProperty {
            input: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_prefers_specific_types() {
        assert_eq!(parse_value("null"), Value::Null);
        assert_eq!(parse_value("true"), Value::Bool(true));
        assert_eq!(parse_value("-42"), Value::Int(-42));
        assert_eq!(parse_value("2.5"), Value::Float(2.5));
        assert_eq!(parse_value("inf"), Value::from("inf"));
        assert_eq!(parse_value("ann"), Value::from("ann"));
    }

    #[test]
    fn test_parse_property() {
        let p = parse_property("cart=7").unwrap();
        assert_eq!(p.name, "cart");
        assert_eq!(p.value, Value::Int(7));

        let p = parse_property("note=a=b").unwrap();
        assert_eq!(p.value, Value::from("a=b"));

        assert_eq!(parse_property("=7").unwrap_err().code(), "ERR_INVALID_PROPERTY");
        assert_eq!(parse_property("cart").unwrap_err().code(), "ERR_INVALID_PROPERTY");
    }

    #[test]
    fn test_render_uses_configured_culture_unless_overridden() {
        let config = LoggerConfig {
            culture: "de-DE".to_string(),
            ..LoggerConfig::default()
        };
        let mut args = RenderArgs {
            template: "{n:N1}".to_string(),
            args: vec!["1234.5".to_string()],
            props: Vec::new(),
            culture: None,
            json: false,
        };
        assert_eq!(render(&args, &config).unwrap().text(), "1.234,5");

        args.culture = Some("en-US".to_string());
        assert_eq!(render(&args, &config).unwrap().text(), "1,234.5");

        args.culture = Some("xx".to_string());
        assert_eq!(render(&args, &config).unwrap_err().code(), "ERR_INVALID_CONFIG");
    }

    #[test]
    fn test_json_lists_properties_in_order() {
        let args = RenderArgs {
            template: "{a}".to_string(),
            args: vec!["1".to_string(), "x".to_string()],
            props: vec!["k=v".to_string()],
            culture: None,
            json: true,
        };
        let json = to_json(&render(&args, &LoggerConfig::default()).unwrap());
        assert_eq!(json["text"], "1 +[ x, (k, v) ]");
        assert_eq!(json["properties"][0]["name"], "a");
        assert_eq!(json["properties"][0]["value"], 1);
        assert_eq!(json["properties"][1]["name"], "arg1");
        assert_eq!(json["properties"].as_array().map(Vec::len), Some(2));
    }
}
