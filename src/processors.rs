//! Built-in processors
//!
//! Each constructor returns a fresh [`Processor`] named after what it does,
//! so it can be looked up with `Output::processor` or selected per message
//! with `with_processors_names`.
//!
//! Order matters: a processor sees the text as left by the ones registered
//! before it. `change_first_char_case` after `prefixer` changes the prefix,
//! not the message.

use crate::core::{Flag, LogLevel, LoggerError, Message, Processor, TimestampFormat};
use regex::Regex;
use std::process;
use std::sync::LazyLock;

#[cfg(feature = "console")]
use colored::{Color, Colorize};
#[cfg(feature = "console")]
use std::collections::BTreeMap;

static ANSI_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x1b\x9b][\[\]()#;?]*(?:(?:(?:[a-zA-Z\d]*(?:;[a-zA-Z\d]*)*)?\x07)|(?:(?:\d{1,4}(?:;\d{0,4})*)?[\dA-PR-TZcf-ntqry=><~]))")
        .expect("Invalid ANSI regex")
});

/// Target case for [`change_first_char_case`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Casing {
    Lowercase,
    Uppercase,
}

/// `<timestamp> [<pid>] [<component>] [<LEVEL>] `
fn mask_prefix(message: &Message, timestamp_format: &TimestampFormat) -> String {
    format!(
        "{} [{}] [{}] [{}] ",
        timestamp_format.format(&message.timestamp()),
        process::id(),
        message.component_name(),
        message.level().to_str()
    )
}

fn prepend(message: &mut Message, prefix: &str) {
    let text = format!("{}{}", prefix, message.text());
    message.set_text(text);
}

pub fn change_first_char_case(casing: Casing) -> Processor {
    Processor::new("ChangeFirstCharCase", move |m: &mut Message| {
        let mut chars = m.text().chars();
        let Some(first) = chars.next() else {
            return Ok(());
        };

        let head: String = match casing {
            Casing::Uppercase => first.to_uppercase().collect(),
            Casing::Lowercase => first.to_lowercase().collect(),
        };
        let text = format!("{}{}", head, chars.as_str());
        m.set_text(text);
        Ok(())
    })
}

/// Every level mapped to its `LogLevel::color_code`
#[cfg(feature = "console")]
pub fn default_level_colors() -> BTreeMap<LogLevel, Color> {
    LogLevel::ALL
        .iter()
        .map(|level| (*level, level.color_code()))
        .collect()
}

/// Colorize the text of messages at the mapped levels. An empty map means
/// [`default_level_colors`].
#[cfg(feature = "console")]
pub fn colorize_based_on_level(colors: BTreeMap<LogLevel, Color>) -> Processor {
    let colors = if colors.is_empty() {
        default_level_colors()
    } else {
        colors
    };
    Processor::new("ColorizeBasedOnLevel", move |m: &mut Message| {
        if let Some(color) = colors.get(&m.level()) {
            let text = m.text().color(*color).to_string();
            m.set_text(text);
        }
        Ok(())
    })
}

/// Colorize the whole text when it contains a mapped word
#[cfg(feature = "console")]
pub fn colorize_based_on_word(colors: BTreeMap<String, Color>) -> Processor {
    Processor::new("ColorizeBasedOnWord", move |m: &mut Message| {
        for (word, color) in &colors {
            if m.text().contains(word.as_str()) {
                let text = m.text().color(*color).to_string();
                m.set_text(text);
            }
        }
        Ok(())
    })
}

/// Strip ANSI escape sequences
pub fn decolourizer() -> Processor {
    Processor::new("Decolourizer", |m: &mut Message| {
        let text = ANSI_REGEX.replace_all(m.text(), "").into_owned();
        m.set_text(text);
        Ok(())
    })
}

/// Always fail with `message`
pub fn error_simulator(message: impl Into<String>) -> Processor {
    let message = message.into();
    Processor::new("ErrorSimulator", move |_: &mut Message| {
        Err(LoggerError::processor("ErrorSimulator", message.as_str()))
    })
}

/// Flag messages at `levels` with `Force`, bypassing the level filter
pub fn force_based_on_level(levels: &[LogLevel]) -> Processor {
    let levels = levels.to_vec();
    Processor::new("ForceBasedOnLevel", move |m: &mut Message| {
        if levels.contains(&m.level()) {
            m.set_flag(Flag::Force);
        }
        Ok(())
    })
}

pub fn flagger(flag: Flag) -> Processor {
    Processor::new("Flagger", move |m: &mut Message| {
        m.set_flag(flag);
        Ok(())
    })
}

pub fn mute_based_on_level(levels: &[LogLevel]) -> Processor {
    let levels = levels.to_vec();
    Processor::new("MuteBasedOnLevel", move |m: &mut Message| {
        if levels.contains(&m.level()) {
            m.set_flag(Flag::Mute);
        }
        Ok(())
    })
}

/// Prefix with `<timestamp> [<pid>] [<component>] [<LEVEL>] `
pub fn prefix_based_on_mask(timestamp_format: TimestampFormat) -> Processor {
    Processor::new("PrefixBasedOnMask", move |m: &mut Message| {
        let prefix = mask_prefix(m, &timestamp_format);
        prepend(m, &prefix);
        Ok(())
    })
}

pub fn prefix_based_on_mask_except_for_levels(
    timestamp_format: TimestampFormat,
    levels: &[LogLevel],
) -> Processor {
    let levels = levels.to_vec();
    Processor::new("PrefixBasedOnMaskExceptForLevels", move |m: &mut Message| {
        if !levels.contains(&m.level()) {
            let prefix = mask_prefix(m, &timestamp_format);
            prepend(m, &prefix);
        }
        Ok(())
    })
}

pub fn prefixer(prefix: impl Into<String>) -> Processor {
    let prefix = prefix.into();
    Processor::new("Prefixer", move |m: &mut Message| {
        prepend(m, &prefix);
        Ok(())
    })
}

/// Mute everything not at `levels`
pub fn print_only_at_level(levels: &[LogLevel]) -> Processor {
    let levels = levels.to_vec();
    Processor::new("PrintOnlyAtLevel", move |m: &mut Message| {
        if !levels.contains(&m.level()) {
            m.set_flag(Flag::Mute);
        }
        Ok(())
    })
}

/// Mute messages not carrying `tag`
pub fn print_only_if_tagged(tag: impl Into<String>) -> Processor {
    let tag = tag.into();
    Processor::new("PrintOnlyIfTagged", move |m: &mut Message| {
        if !m.contains_tag(&tag) {
            m.set_flag(Flag::Mute);
        }
        Ok(())
    })
}

/// Mute messages carrying any of `tags`
pub fn print_only_if_not_tagged_with<I, S>(tags: I) -> Processor
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
    Processor::new("PrintOnlyIfNotTaggedWith", move |m: &mut Message| {
        if tags.iter().any(|tag| m.contains_tag(tag)) {
            m.set_flag(Flag::Mute);
        }
        Ok(())
    })
}

pub fn suffixer(suffix: impl Into<String>) -> Processor {
    let suffix = suffix.into();
    Processor::new("Suffixer", move |m: &mut Message| {
        let text = format!("{}{}", m.text(), suffix);
        m.set_text(text);
        Ok(())
    })
}

pub fn tagger<I, S>(tags: I) -> Processor
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
    Processor::new("Tagger", move |m: &mut Message| {
        m.add_tags(tags.iter().cloned());
        Ok(())
    })
}
