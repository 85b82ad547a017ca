//! Scheduling records as the Splynx API returns them.
//!
//! Splynx is loose about encodings: flags arrive as `"0"`/`"1"` strings,
//! identifiers as numbers or numeric strings, and optional fields may be
//! missing, `null` or `""`. Decoding normalizes all of that into plain
//! Rust options so that the fallback chains in [`crate::resolve`] never
//! have to look at raw JSON.

use serde::Deserialize;

/// A scheduling task (work order).
///
/// Immutable snapshot for one run; re-fetched every run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Task {
    #[serde(deserialize_with = "de::id")]
    pub id: u64,

    #[serde(default, deserialize_with = "de::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub subject: Option<String>,

    /// Source encoding `"1"` means closed.
    #[serde(default, deserialize_with = "de::flag")]
    pub closed: bool,
    /// Source encoding `"1"` means the task is on the calendar.
    #[serde(default, deserialize_with = "de::flag")]
    pub is_scheduled: bool,
    /// ISO-8601 date-time, kept verbatim for rendering.
    #[serde(default, deserialize_with = "de::text")]
    pub scheduled_from: Option<String>,

    /// Admin id of the assigned technician. `None` means unassigned.
    ///
    /// Optional ids that do not parse decode as `None` (with a warning)
    /// instead of failing the record.
    #[serde(default, deserialize_with = "de::opt_id")]
    pub assignee: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub project_id: Option<u64>,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub location_id: Option<u64>,
    #[serde(default, deserialize_with = "de::text")]
    pub address: Option<String>,

    #[serde(default, deserialize_with = "de::text")]
    pub technician_name: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub employee_name: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "de::named")]
    pub employee: Option<Named>,

    #[serde(default, deserialize_with = "de::text")]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "de::named")]
    pub customer: Option<Named>,
}

/// Nested `{ "name": ... }` object (employee, customer).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Named {
    #[serde(default, deserialize_with = "de::text")]
    pub name: Option<String>,
}

/// A comment left on a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Comment {
    #[serde(default, deserialize_with = "de::opt_id")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "de::id")]
    pub task_id: u64,
    /// ISO-8601 date-time.
    #[serde(default)]
    pub created_at: String,
    #[serde(default, deserialize_with = "de::text")]
    pub admin_name: Option<String>,
    #[serde(default, deserialize_with = "de::text")]
    pub comment: Option<String>,
}

impl Task {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    pub fn with_schedule(mut self, scheduled_from: impl Into<String>) -> Self {
        self.scheduled_from = Some(scheduled_from.into());
        self.is_scheduled = true;
        self
    }

    pub fn with_assignee(mut self, assignee: u64) -> Self {
        self.assignee = Some(assignee);
        self
    }

    pub fn with_technician(mut self, name: impl Into<String>) -> Self {
        self.technician_name = Some(name.into());
        self
    }
}

impl Comment {
    pub fn new(
        task_id: u64,
        created_at: impl Into<String>,
        admin_name: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            task_id,
            created_at: created_at.into(),
            admin_name: Some(admin_name.into()),
            comment: Some(body.into()),
        }
    }

    /// Body text, empty when the source had none.
    pub fn body(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }

    /// Author display name, empty when the source had none.
    pub fn author(&self) -> &str {
        self.admin_name.as_deref().unwrap_or("")
    }
}

/// Lenient field decoders for Splynx payloads.
pub(crate) mod de {
    use serde::de::{Error, IgnoredAny};
    use serde::{Deserialize, Deserializer};
    use tracing::warn;

    use super::Named;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Int(u64),
        Str(String),
        Other(IgnoredAny),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Int(i64),
        Str(String),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawText {
        Str(String),
        Int(i64),
        Float(f64),
        Other(IgnoredAny),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNamed {
        Named(Named),
        Other(IgnoredAny),
    }

    fn parse_id(raw: RawId) -> Result<Option<u64>, String> {
        match raw {
            RawId::Int(n) => Ok(Some(n)),
            RawId::Str(s) if s.trim().is_empty() => Ok(None),
            RawId::Str(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| format!("invalid identifier: {s:?}")),
            RawId::Other(_) => Err("invalid identifier: not a number or string".to_string()),
        }
    }

    pub fn id<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
        parse_id(RawId::deserialize(d)?)
            .map_err(D::Error::custom)?
            .ok_or_else(|| D::Error::custom("empty identifier"))
    }

    /// Optional reference; a malformed value is dropped, not fatal.
    pub fn opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        let Some(raw) = Option::<RawId>::deserialize(d)? else {
            return Ok(None);
        };
        Ok(parse_id(raw).unwrap_or_else(|reason| {
            warn!(%reason, "ignoring optional identifier");
            None
        }))
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        Ok(match Option::<RawFlag>::deserialize(d)? {
            Some(RawFlag::Bool(b)) => b,
            Some(RawFlag::Int(n)) => n == 1,
            Some(RawFlag::Str(s)) => s.trim() == "1",
            None => false,
        })
    }

    /// Free text; empty strings count as absent.
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let s = match Option::<RawText>::deserialize(d)? {
            Some(RawText::Str(s)) => s,
            Some(RawText::Int(n)) => n.to_string(),
            Some(RawText::Float(f)) => f.to_string(),
            Some(RawText::Other(_)) | None => return Ok(None),
        };
        Ok(if s.is_empty() { None } else { Some(s) })
    }

    /// Nested object with a `name`; any other shape is ignored.
    pub fn named<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Named>, D::Error> {
        Ok(match Option::<RawNamed>::deserialize(d)? {
            Some(RawNamed::Named(n)) => Some(n),
            Some(RawNamed::Other(_)) | None => None,
        })
    }
}
