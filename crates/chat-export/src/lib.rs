//! Converts chat export JSON into a two-column CSV transcript.

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

const RICH_TEXT: &str = "RichText";

/// Top level of an export file, as found on disk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatExport {
    #[serde(default)]
    pub conversations: Vec<Conversation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Conversation {
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(rename = "MessageList", default)]
    pub messages: Vec<RawMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMessage {
    #[serde(default)]
    pub messagetype: Option<String>,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub originalarrivaltime: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub display_name: String,
    pub content: String,
    pub arrived: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationLog {
    pub display_name: String,
    pub messages: Vec<Message>,
}

/// Rich text messages only, oldest first within each conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    pub conversations: Vec<ConversationLog>,
}

#[derive(Serialize)]
struct Row<'a> {
    #[serde(rename = "displayName")]
    display_name: &'a str,
    content: &'a str,
}

impl ChatExport {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        Self::from_json(&json).with_context(|| format!("Failed to parse {:?}", path))
    }

    /// Drops everything but rich text, fills in missing sender names from the
    /// conversation and orders each conversation by arrival time.
    pub fn normalize(self) -> Result<Transcript> {
        let mut conversations = Vec::with_capacity(self.conversations.len());

        for conversation in self.conversations {
            let fallback = conversation.display_name.unwrap_or_default();
            let mut messages = Vec::new();

            for raw in conversation.messages {
                if raw.messagetype.as_deref() != Some(RICH_TEXT) {
                    continue;
                }

                let display_name = match raw.display_name {
                    Some(name) if !name.is_empty() => name,
                    _ => fallback.clone(),
                };
                let stamp = raw
                    .originalarrivaltime
                    .ok_or_else(|| anyhow::anyhow!("Message from {:?} has no arrival time", display_name))?;

                messages.push(Message {
                    display_name,
                    content: raw.content.unwrap_or_default(),
                    arrived: parse_timestamp(&stamp)?,
                });
            }

            messages.sort_by_key(|m| m.arrived);
            conversations.push(ConversationLog {
                display_name: fallback,
                messages,
            });
        }

        Ok(Transcript { conversations })
    }
}

impl Transcript {
    pub fn message_count(&self) -> usize {
        self.conversations.iter().map(|c| c.messages.len()).sum()
    }

    /// Keeps only messages containing at least one CJK ideograph.
    pub fn retain_chinese(&mut self) {
        for conversation in &mut self.conversations {
            conversation.messages.retain(|m| contains_chinese(&m.content));
        }
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        let mut wrote_any = false;

        for conversation in &self.conversations {
            for message in &conversation.messages {
                writer.serialize(Row {
                    display_name: &message.display_name,
                    content: &message.content,
                })?;
                wrote_any = true;
            }
        }

        // serialize() only emits the header alongside the first row
        if !wrote_any {
            writer.write_record(["displayName", "content"])?;
        }

        writer.flush()?;
        Ok(())
    }

    pub fn export_to_path(&self, path: &Path) -> Result<()> {
        let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
        self.write_csv(file)
            .with_context(|| format!("Failed to write {:?}", path))?;
        log::info!("Exported {} messages to {:?}", self.message_count(), path);
        Ok(())
    }
}

fn contains_chinese(text: &str) -> bool {
    text.chars().any(|c| ('\u{4E00}'..='\u{9FFF}').contains(&c))
}

fn parse_timestamp(stamp: &str) -> Result<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(stamp) {
        return Ok(dt);
    }
    // Some exports omit the offset; those are taken as UTC.
    let naive = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S%.f"))
        .with_context(|| format!("Unrecognised timestamp {:?}", stamp))?;
    Ok(naive.and_utc().fixed_offset())
}
