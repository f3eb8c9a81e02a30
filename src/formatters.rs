//! Formatters: processors that serialize the whole message envelope
//!
//! A formatter replaces the processed text with a rendering of the message's
//! metadata (identity, component, output, level, timestamp, text, tags, flag,
//! routing names and fields). Optional sections only appear when non-empty.
//! Set one per output with `Output::set_formatter`; outputs without a
//! formatter write the processed text as-is.

use crate::core::{format_fields, Flag, Message, Processor, TimestampFormat};
use serde_json::{Map, Value};

fn envelope(message: &Message) -> Map<String, Value> {
    let mut map = Map::new();

    map.insert("id".to_string(), Value::from(message.id()));
    map.insert(
        "contentBasedHashID".to_string(),
        Value::from(message.content_hash()),
    );
    map.insert("component".to_string(), Value::from(message.component_name()));
    map.insert("output".to_string(), Value::from(message.output_name()));
    map.insert("level".to_string(), Value::from(message.level().name()));
    map.insert(
        "timestamp".to_string(),
        Value::from(TimestampFormat::Rfc3339.format(&message.timestamp())),
    );
    map.insert("message".to_string(), Value::from(message.text()));

    if !message.tags().is_empty() {
        map.insert("tags".to_string(), Value::from(message.tags().as_slice()));
    }
    if message.flag() != Flag::None {
        map.insert("flag".to_string(), Value::from(message.flag().name()));
    }
    if !message.outputs_names().is_empty() {
        map.insert(
            "outputsNames".to_string(),
            Value::from(message.outputs_names()),
        );
    }
    if !message.processors_names().is_empty() {
        map.insert(
            "processorsNames".to_string(),
            Value::from(message.processors_names()),
        );
    }

    for (key, value) in message.fields() {
        map.insert(key.clone(), value.to_json_value());
    }

    map
}

/// Single-line JSON
pub fn json() -> Processor {
    Processor::new("JSON", |m: &mut Message| {
        let text = serde_json::to_string(&Value::Object(envelope(m)))?;
        m.set_text(text);
        Ok(())
    })
}

/// Indented JSON
pub fn json_pretty() -> Processor {
    Processor::new("JSONPretty", |m: &mut Message| {
        let text = serde_json::to_string_pretty(&Value::Object(envelope(m)))?;
        m.set_text(text);
        Ok(())
    })
}

/// `component=.. output=.. level=.. message=.. timestamp=..` followed by
/// fields, the flag and tags when present.
pub fn text() -> Processor {
    Processor::new("Text", |m: &mut Message| {
        let mut parts = vec![
            format!("component={}", m.component_name()),
            format!("output={}", m.output_name().to_lowercase()),
            format!("level={}", m.level().name()),
            format!("message={}", m.text()),
            format!(
                "timestamp={}",
                TimestampFormat::Rfc3339.format(&m.timestamp())
            ),
        ];

        if !m.fields().is_empty() {
            parts.push(format_fields(m.fields()));
        }

        if m.flag() != Flag::None {
            parts.push(format!("flag={}", m.flag()));
        }
        if !m.tags().is_empty() {
            parts.push(format!(
                "tags=[{}]",
                m.tags().iter().collect::<Vec<_>>().join(", ")
            ));
        }

        let text = parts.join(" ");
        m.set_text(text);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use chrono::TimeZone;

    fn stamped(content: &str) -> Message {
        let mut m = Message::new(LogLevel::Info, content);
        m.set_component_name("api")
            .set_output_name("Console")
            .set_timestamp(chrono::Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap());
        m
    }

    #[test]
    fn test_text_format() {
        let mut m = stamped("Request processed");
        text().run(&mut m).unwrap();

        assert_eq!(
            m.text(),
            "component=api output=console level=info message=Request processed \
             timestamp=2025-01-08T10:30:45Z"
        );
    }

    #[test]
    fn test_text_format_optional_sections() {
        let mut m = stamped("x");
        m.set_field("user_id", 123)
            .set_flag(Flag::Force)
            .add_tags(["auth", "slow"]);
        text().run(&mut m).unwrap();

        assert!(m.text().ends_with("user_id=123 flag=force tags=[auth, slow]"));
    }

    #[test]
    fn test_json_format() {
        let mut m = stamped("Error occurred");
        m.set_level(LogLevel::Error).set_field("latency_ms", 42);
        json().run(&mut m).unwrap();

        let parsed: Value = serde_json::from_str(m.text()).unwrap();
        assert_eq!(parsed["level"], "error");
        assert_eq!(parsed["message"], "Error occurred");
        assert_eq!(parsed["component"], "api");
        assert_eq!(parsed["output"], "Console");
        assert_eq!(parsed["timestamp"], "2025-01-08T10:30:45Z");
        assert_eq!(parsed["latency_ms"], 42);
        assert_eq!(parsed["contentBasedHashID"].as_str().unwrap().len(), 40);
        assert!(!m.text().contains('\n'));
    }

    #[test]
    fn test_json_omits_empty_sections() {
        let mut m = stamped("quiet");
        json().run(&mut m).unwrap();

        let parsed: Value = serde_json::from_str(m.text()).unwrap();
        let object = parsed.as_object().unwrap();
        assert!(!object.contains_key("tags"));
        assert!(!object.contains_key("flag"));
        assert!(!object.contains_key("outputsNames"));
        assert!(!object.contains_key("processorsNames"));
    }

    #[test]
    fn test_json_includes_routing() {
        let mut m = stamped("routed");
        m.set_outputs_names(["Console"]).add_tags(["t"]);
        json().run(&mut m).unwrap();

        let parsed: Value = serde_json::from_str(m.text()).unwrap();
        assert_eq!(parsed["outputsNames"], serde_json::json!(["Console"]));
        assert_eq!(parsed["tags"], serde_json::json!(["t"]));
    }

    #[test]
    fn test_json_pretty_is_indented() {
        let mut m = stamped("x");
        json_pretty().run(&mut m).unwrap();

        assert!(m.text().starts_with("{\n  \""));
        let parsed: Value = serde_json::from_str(m.text()).unwrap();
        assert_eq!(parsed["message"], "x");
    }
}
