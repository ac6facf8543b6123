use crate::categories::{self, CategoryOpRequest};
use crate::envelope::Envelope;
use crate::errors::{FaqError, FaqResult};
use crate::model::{DeleteRequest, FaqInput, UpdateRequest};
use crate::store::RecordStore;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::str::FromStr;
use strum::EnumString;
use tracing::{debug, warn};

/// Actions the endpoint understands. Each accepts its camelCase wire name
/// and a kebab-case alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum Action {
    #[strum(serialize = "getApiKey", serialize = "get-credential")]
    GetCredential,
    #[strum(serialize = "getData", serialize = "fetch-all")]
    FetchAll,
    #[strum(serialize = "addData", serialize = "append")]
    Append,
    #[strum(serialize = "updateData", serialize = "update")]
    Update,
    #[strum(serialize = "deleteData", serialize = "delete")]
    Delete,
    #[strum(serialize = "manageCategories", serialize = "bulk-category-op")]
    BulkCategoryOp,
}

impl Action {
    pub fn wire_name(self) -> &'static str {
        match self {
            Action::GetCredential => "getApiKey",
            Action::FetchAll => "getData",
            Action::Append => "addData",
            Action::Update => "updateData",
            Action::Delete => "deleteData",
            Action::BulkCategoryOp => "manageCategories",
        }
    }

    fn failure_prefix(self) -> Option<&'static str> {
        match self {
            Action::GetCredential => None,
            Action::FetchAll => Some("failed to read the sheet"),
            Action::Append => Some("failed to write to the sheet"),
            Action::Update => Some("failed to update the row"),
            Action::Delete => Some("failed to delete the row"),
            Action::BulkCategoryOp => Some("failed to manage categories"),
        }
    }
}

/// `{action, data}` as posted by clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    pub action: String,
    #[serde(default)]
    pub data: Value,
}

impl ActionRequest {
    pub fn new(action: Action, data: Value) -> Self {
        Self {
            action: action.wire_name().to_string(),
            data,
        }
    }
}

/// Maps named actions onto the record store and wraps every outcome in an
/// [`Envelope`]. Nothing it does returns an error to the caller.
pub struct ActionRouter {
    store: RecordStore,
    api_key: Option<String>,
}

impl ActionRouter {
    pub fn new(store: RecordStore, api_key: Option<String>) -> Self {
        Self { store, api_key }
    }

    /// Entry point for raw request bodies; malformed JSON becomes an error
    /// envelope like any other failure.
    pub fn handle_body(&self, body: &str) -> Envelope {
        match serde_json::from_str::<ActionRequest>(body) {
            Ok(request) => self.handle(request),
            Err(err) => {
                warn!(error = %err, "rejected malformed request body");
                Envelope::error(FaqError::from(err).to_string())
            }
        }
    }

    pub fn handle(&self, request: ActionRequest) -> Envelope {
        let Ok(action) = Action::from_str(&request.action) else {
            warn!(action = %request.action, "unrecognized action");
            return Envelope::error(FaqError::UnrecognizedAction(request.action).to_string());
        };

        debug!(action = action.wire_name(), "dispatching");
        match self.run(action, request.data) {
            Ok(envelope) => envelope,
            Err(err) => {
                let detail = format!("{err:#}");
                warn!(action = action.wire_name(), code = err.code(), error = %detail, "action failed");
                match action.failure_prefix() {
                    Some(prefix) => Envelope::error(format!("{prefix}: {detail}")),
                    None => Envelope::error(detail),
                }
            }
        }
    }

    fn run(&self, action: Action, data: Value) -> FaqResult<Envelope> {
        match action {
            Action::GetCredential => {
                let api_key = self
                    .api_key
                    .as_deref()
                    .filter(|key| !key.is_empty())
                    .ok_or_else(|| FaqError::not_found("configured API key"))?;
                Ok(Envelope::with_data(json!({ "apiKey": api_key })))
            }
            Action::FetchAll => {
                let records = self.store.fetch_all()?;
                Ok(Envelope::with_data(serde_json::to_value(records)?))
            }
            Action::Append => {
                let records: Vec<FaqInput> = if data.is_null() {
                    Vec::new()
                } else {
                    serde_json::from_value(data)?
                };
                let added = self.store.append(&records)?;
                Ok(Envelope::success_with(
                    format!("{added} row(s) added"),
                    json!({ "added": added }),
                ))
            }
            Action::Update => {
                let request: UpdateRequest = payload(data)?;
                let (row_index, record) = request.validate()?;
                self.store.update_row(row_index, &record)?;
                Ok(Envelope::success(format!("row {row_index} updated")))
            }
            Action::Delete => {
                let request: DeleteRequest = payload(data)?;
                let row_index = request.validate()?;
                self.store.delete_row(row_index)?;
                Ok(Envelope::success(format!("row {row_index} deleted")))
            }
            Action::BulkCategoryOp => {
                let request: CategoryOpRequest = payload(data)?;
                let op = request.into_op()?;
                let modified = categories::apply_bulk_op(&self.store, &op)?;
                Ok(Envelope::success_with(
                    format!("'{}' finished, {modified} row(s) affected", op.name()),
                    json!({ "modified": modified }),
                ))
            }
        }
    }
}

// A missing `data` is an empty object, so required-field checks report
// validation errors rather than payload errors.
fn payload<T: for<'de> Deserialize<'de> + Default>(data: Value) -> FaqResult<T> {
    if data.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_action_spellings_parse() {
        assert_eq!(Action::from_str("getData").unwrap(), Action::FetchAll);
        assert_eq!(Action::from_str("fetch-all").unwrap(), Action::FetchAll);
        assert_eq!(
            Action::from_str("bulk-category-op").unwrap(),
            Action::BulkCategoryOp
        );
        assert!(Action::from_str("generate").is_err());
        for action in [
            Action::GetCredential,
            Action::FetchAll,
            Action::Append,
            Action::Update,
            Action::Delete,
            Action::BulkCategoryOp,
        ] {
            assert_eq!(Action::from_str(action.wire_name()).unwrap(), action);
        }
    }
}
