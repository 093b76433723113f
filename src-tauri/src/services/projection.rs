//! Object Projection
//!
//! Turns raw `suix_getOwnedObjects` entries into [`Todo`] records. Parsing is
//! total: every entry is either a todo or a skip with a reason, never an error.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{ResolvedPackage, StructTag, SuiAddress, Todo};
use crate::ledger::{LedgerClient, LedgerResult};

/// Why an owned object did not make it into the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The entry is an `{ "error": ... }` response
    ObjectError,
    MissingData,
    MissingId,
    /// Content is a package or absent
    NotMoveObject,
    TypeMismatch(String),
    MissingText,
    MissingDone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    Todo(Todo),
    Skip(SkipReason),
}

/// Project one object response against the expected struct type
pub fn project_object(raw: &Value, expected: &StructTag) -> Projection {
    if raw.get("error").is_some_and(|e| !e.is_null()) {
        return Projection::Skip(SkipReason::ObjectError);
    }
    let Some(data) = raw.get("data").filter(|d| d.is_object()) else {
        return Projection::Skip(SkipReason::MissingData);
    };
    let Some(id) = data
        .get("objectId")
        .and_then(Value::as_str)
        .and_then(|s| SuiAddress::parse(s).ok())
    else {
        return Projection::Skip(SkipReason::MissingId);
    };

    let content = match data.get("content") {
        Some(c) if c.get("dataType").and_then(Value::as_str) == Some("moveObject") => c,
        _ => return Projection::Skip(SkipReason::NotMoveObject),
    };

    let type_str = content.get("type").and_then(Value::as_str).unwrap_or_default();
    if StructTag::parse(type_str).as_ref() != Some(expected) {
        return Projection::Skip(SkipReason::TypeMismatch(type_str.to_string()));
    }

    let fields = content.get("fields");
    let Some(text) = fields.and_then(|f| f.get("text")).and_then(Value::as_str) else {
        return Projection::Skip(SkipReason::MissingText);
    };
    let Some(done) = fields.and_then(|f| f.get("done")).and_then(Value::as_bool) else {
        return Projection::Skip(SkipReason::MissingDone);
    };

    // Versions arrive as decimal strings; older nodes sent numbers
    let version = match data.get("version") {
        Some(Value::String(s)) => s.parse().unwrap_or(0),
        Some(v) => v.as_u64().unwrap_or(0),
        None => 0,
    };

    Projection::Todo(Todo {
        id,
        text: text.to_string(),
        done,
        version,
    })
}

/// Project a page, keeping ledger order and dropping skips
pub fn project_objects(raw: &[Value], expected: &StructTag) -> Vec<Todo> {
    raw.iter()
        .filter_map(|object| match project_object(object, expected) {
            Projection::Todo(todo) => Some(todo),
            Projection::Skip(reason) => {
                log::debug!("skipping owned object: {:?}", reason);
                None
            }
        })
        .collect()
}

/// Fetches the full projection for one package
#[derive(Clone)]
pub struct TodoQuery {
    client: Arc<dyn LedgerClient>,
    package: ResolvedPackage,
}

impl TodoQuery {
    pub fn new(client: Arc<dyn LedgerClient>, package: ResolvedPackage) -> Self {
        Self { client, package }
    }

    /// All todos owned by `owner`, following every result page
    pub async fn fetch(&self, owner: &SuiAddress) -> LedgerResult<Vec<Todo>> {
        let struct_type = self.package.todo_struct_type();
        let expected = self.package.todo_struct_tag();

        let mut todos = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let page = self
                .client
                .get_owned_objects(owner, &struct_type, cursor.as_deref())
                .await?;
            todos.extend(project_objects(&page.data, &expected));

            match page.next_cursor {
                Some(next) if page.has_next_page && cursor.as_ref() != Some(&next) => {
                    cursor = Some(next)
                }
                _ => break,
            }
        }
        log::debug!("fetched {} todos for {}", todos.len(), owner);
        Ok(todos)
    }
}
