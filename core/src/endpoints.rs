//! Declarative table of provider operations.
//!
//! # Design
//! Each operation is an `Endpoint` constant: a name, a path template with
//! `{placeholders}`, a verb, and a `ParamShape` that says how the caller's
//! `Payload` turns into a parameter bag. `JotformClient::dispatch` is the one
//! consumer of the table; the typed client methods only pick an entry.

use serde_json::Value;

use crate::error::ApiError;
use crate::flatten;
use crate::http::HttpMethod;
use crate::params::{create_conditions, create_history_query, kind, Params};
use crate::types::{HistoryQuery, ListQuery};

/// How an endpoint encodes its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamShape {
    /// No parameters.
    Empty,
    /// `offset`/`limit`/`orderby`/`filter` from a `ListQuery`.
    Conditions,
    /// Activity log filters from a `HistoryQuery`.
    History,
    /// A flat object passed through as-is.
    Plain,
    /// An object flattened under `outer`, splitting keys at the first
    /// underscore.
    Fields(&'static str),
    /// An object flattened under `outer` without splitting keys.
    Bracketed(&'static str),
    /// A whole-form group → item → property tree.
    Form,
    /// A JSON document serialized whole into the query string.
    Document,
    /// A constant parameter bag.
    Fixed(&'static [(&'static str, &'static str)]),
}

/// Caller input for one operation.
#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
    None,
    Conditions(&'a ListQuery),
    History(&'a HistoryQuery),
    Object(&'a Value),
    Document(&'a Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub path: &'static str,
    pub method: HttpMethod,
    pub shape: ParamShape,
}

impl Endpoint {
    const fn new(
        name: &'static str,
        method: HttpMethod,
        path: &'static str,
        shape: ParamShape,
    ) -> Self {
        Self {
            name,
            path,
            method,
            shape,
        }
    }

    /// Number of `{placeholder}` segments in the path template.
    pub fn arity(&self) -> usize {
        self.path.matches('{').count()
    }

    /// Substitute `args` into the path template, in order.
    pub fn render(&self, args: &[&str]) -> Result<String, ApiError> {
        if args.len() != self.arity() {
            return Err(self.bad_arg(format!(
                "expected {} path argument(s), got {}",
                self.arity(),
                args.len()
            )));
        }

        let mut rendered = String::with_capacity(self.path.len() + 16);
        let mut rest = self.path;
        let mut args = args.iter();
        while let Some(open) = rest.find('{') {
            let close = rest[open..]
                .find('}')
                .map(|i| open + i)
                .ok_or_else(|| self.bad_arg("unterminated placeholder in template".to_string()))?;
            let placeholder = &rest[open + 1..close];
            let arg = args.next().copied().unwrap_or_default();
            if arg.is_empty() {
                return Err(self.bad_arg(format!("`{placeholder}` is empty")));
            }
            if let Some(bad) = arg.chars().find(|c| !is_segment_char(*c)) {
                return Err(self.bad_arg(format!(
                    "`{placeholder}` contains {bad:?}, which is not allowed in a path segment: {arg:?}"
                )));
            }
            rendered.push_str(&rest[..open]);
            rendered.push_str(arg);
            rest = &rest[close + 1..];
        }
        rendered.push_str(rest);
        Ok(rendered)
    }

    /// Turn `payload` into a parameter bag according to this endpoint's shape.
    ///
    /// A `Document` becomes a single key holding the serialized JSON with an
    /// empty value, so the document alone makes up the query string.
    pub fn encode(&self, payload: Payload<'_>) -> Result<Params, ApiError> {
        let params = match (self.shape, payload) {
            (ParamShape::Empty, Payload::None) => Params::new(),
            (ParamShape::Fixed(pairs), Payload::None) => pairs.iter().copied().collect(),
            (ParamShape::Conditions, Payload::Conditions(query)) => create_conditions(query)?,
            (ParamShape::History, Payload::History(query)) => create_history_query(query),
            (ParamShape::Plain, Payload::Object(value)) => Params::from_object(value)?,
            (ParamShape::Fields(outer), Payload::Object(value)) => flatten::split_fields(outer, value)?,
            (ParamShape::Bracketed(outer), Payload::Object(value)) => {
                flatten::bracket_fields(outer, value)?
            }
            (ParamShape::Form, Payload::Object(value)) => flatten::flatten_form(value)?,
            (ParamShape::Document, Payload::Document(value)) => {
                if !(value.is_object() || value.is_array()) {
                    return Err(ApiError::InvalidPayloadShape(format!(
                        "{} expects an object or array document, got {}",
                        self.name,
                        kind(value)
                    )));
                }
                let text = serde_json::to_string(value).map_err(|e| ApiError::Encode(e.to_string()))?;
                [(text, String::new())].into_iter().collect()
            }
            (shape, payload) => {
                return Err(ApiError::InvalidPayloadShape(format!(
                    "{} expects {shape:?} but got {}",
                    self.name,
                    payload.describe()
                )))
            }
        };
        Ok(params)
    }

    fn bad_arg(&self, reason: String) -> ApiError {
        ApiError::InvalidPathArgument {
            endpoint: self.name,
            reason,
        }
    }
}

/// Unreserved and sub-delimiter characters, plus `:` and `@` (RFC 3986 `pchar`
/// without percent escapes).
fn is_segment_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-._~!$&'()*+,;=:@".contains(c)
}

impl Payload<'_> {
    fn describe(&self) -> &'static str {
        match self {
            Payload::None => "no payload",
            Payload::Conditions(_) => "list conditions",
            Payload::History(_) => "history filters",
            Payload::Object(_) => "an object payload",
            Payload::Document(_) => "a document payload",
        }
    }
}

use crate::http::HttpMethod::{Delete, Get, Post, Put};
use self::ParamShape::{Bracketed, Conditions, Document, Empty, Fields, Fixed, Form, History, Plain};

pub const GET_USER: Endpoint = Endpoint::new("get_user", Get, "/user", Empty);
pub const GET_USAGE: Endpoint = Endpoint::new("get_usage", Get, "/user/usage", Empty);
pub const GET_FORMS: Endpoint = Endpoint::new("get_forms", Get, "/user/forms", Conditions);
pub const GET_SUBMISSIONS: Endpoint =
    Endpoint::new("get_submissions", Get, "/user/submissions", Conditions);
pub const GET_SUBUSERS: Endpoint = Endpoint::new("get_subusers", Get, "/user/subusers", Empty);
pub const GET_FOLDERS: Endpoint = Endpoint::new("get_folders", Get, "/user/folders", Empty);
pub const GET_REPORTS: Endpoint = Endpoint::new("get_reports", Get, "/user/reports", Empty);
pub const GET_SETTINGS: Endpoint = Endpoint::new("get_settings", Get, "/user/settings", Empty);
pub const UPDATE_SETTINGS: Endpoint =
    Endpoint::new("update_settings", Post, "/user/settings", Plain);
pub const GET_HISTORY: Endpoint = Endpoint::new("get_history", Get, "/user/history", History);
pub const REGISTER_USER: Endpoint = Endpoint::new("register_user", Post, "/user/register", Plain);
pub const LOGIN_USER: Endpoint = Endpoint::new("login_user", Post, "/user/login", Plain);
pub const LOGOUT_USER: Endpoint = Endpoint::new("logout_user", Get, "/user/logout", Empty);

pub const GET_FORM: Endpoint = Endpoint::new("get_form", Get, "/form/{id}", Empty);
pub const DELETE_FORM: Endpoint = Endpoint::new("delete_form", Delete, "/form/{id}", Empty);
pub const CREATE_FORM: Endpoint = Endpoint::new("create_form", Post, "/user/forms", Form);
pub const CREATE_FORMS: Endpoint = Endpoint::new("create_forms", Put, "/user/forms", Document);
pub const CLONE_FORM: Endpoint = Endpoint::new(
    "clone_form",
    Post,
    "/form/{id}/clone",
    Fixed(&[("method", "post")]),
);

pub const GET_FORM_QUESTIONS: Endpoint =
    Endpoint::new("get_form_questions", Get, "/form/{id}/questions", Empty);
pub const GET_FORM_QUESTION: Endpoint =
    Endpoint::new("get_form_question", Get, "/form/{id}/question/{qid}", Empty);
pub const CREATE_FORM_QUESTION: Endpoint = Endpoint::new(
    "create_form_question",
    Post,
    "/form/{id}/questions",
    Bracketed("question"),
);
pub const CREATE_FORM_QUESTIONS: Endpoint =
    Endpoint::new("create_form_questions", Put, "/form/{id}/questions", Document);
pub const EDIT_FORM_QUESTION: Endpoint = Endpoint::new(
    "edit_form_question",
    Post,
    "/form/{id}/question/{qid}",
    Bracketed("question"),
);
pub const DELETE_FORM_QUESTION: Endpoint =
    Endpoint::new("delete_form_question", Delete, "/form/{id}/question/{qid}", Empty);

pub const GET_FORM_PROPERTIES: Endpoint =
    Endpoint::new("get_form_properties", Get, "/form/{id}/properties", Empty);
pub const GET_FORM_PROPERTY: Endpoint =
    Endpoint::new("get_form_property", Get, "/form/{id}/properties/{key}", Empty);
pub const SET_FORM_PROPERTIES: Endpoint = Endpoint::new(
    "set_form_properties",
    Post,
    "/form/{id}/properties",
    Bracketed("properties"),
);
pub const SET_MULTIPLE_FORM_PROPERTIES: Endpoint = Endpoint::new(
    "set_multiple_form_properties",
    Put,
    "/form/{id}/properties",
    Document,
);

pub const GET_FORM_SUBMISSIONS: Endpoint =
    Endpoint::new("get_form_submissions", Get, "/form/{id}/submissions", Conditions);
pub const CREATE_FORM_SUBMISSION: Endpoint = Endpoint::new(
    "create_form_submission",
    Post,
    "/form/{id}/submissions",
    Fields("submission"),
);
pub const CREATE_FORM_SUBMISSIONS: Endpoint =
    Endpoint::new("create_form_submissions", Put, "/form/{id}/submissions", Document);
pub const GET_FORM_FILES: Endpoint = Endpoint::new("get_form_files", Get, "/form/{id}/files", Empty);
pub const GET_FORM_WEBHOOKS: Endpoint =
    Endpoint::new("get_form_webhooks", Get, "/form/{id}/webhooks", Empty);
pub const CREATE_FORM_WEBHOOK: Endpoint =
    Endpoint::new("create_form_webhook", Post, "/form/{id}/webhooks", Plain);
pub const DELETE_FORM_WEBHOOK: Endpoint = Endpoint::new(
    "delete_form_webhook",
    Delete,
    "/form/{id}/webhooks/{webhook_id}",
    Empty,
);
pub const GET_FORM_REPORTS: Endpoint =
    Endpoint::new("get_form_reports", Get, "/form/{id}/reports", Empty);
pub const CREATE_REPORT: Endpoint = Endpoint::new("create_report", Post, "/form/{id}/reports", Plain);

pub const GET_SUBMISSION: Endpoint = Endpoint::new("get_submission", Get, "/submission/{id}", Empty);
pub const EDIT_SUBMISSION: Endpoint =
    Endpoint::new("edit_submission", Post, "/submission/{id}", Fields("submission"));
pub const DELETE_SUBMISSION: Endpoint =
    Endpoint::new("delete_submission", Delete, "/submission/{id}", Empty);

pub const GET_REPORT: Endpoint = Endpoint::new("get_report", Get, "/report/{id}", Empty);
pub const DELETE_REPORT: Endpoint = Endpoint::new("delete_report", Delete, "/report/{id}", Empty);
pub const GET_FOLDER: Endpoint = Endpoint::new("get_folder", Get, "/folder/{id}", Empty);
pub const GET_PLAN: Endpoint = Endpoint::new("get_plan", Get, "/system/plan/{name}", Empty);

/// Every operation the client knows, in no particular order.
pub const ENDPOINTS: &[Endpoint] = &[
    GET_USER,
    GET_USAGE,
    GET_FORMS,
    GET_SUBMISSIONS,
    GET_SUBUSERS,
    GET_FOLDERS,
    GET_REPORTS,
    GET_SETTINGS,
    UPDATE_SETTINGS,
    GET_HISTORY,
    REGISTER_USER,
    LOGIN_USER,
    LOGOUT_USER,
    GET_FORM,
    DELETE_FORM,
    CREATE_FORM,
    CREATE_FORMS,
    CLONE_FORM,
    GET_FORM_QUESTIONS,
    GET_FORM_QUESTION,
    CREATE_FORM_QUESTION,
    CREATE_FORM_QUESTIONS,
    EDIT_FORM_QUESTION,
    DELETE_FORM_QUESTION,
    GET_FORM_PROPERTIES,
    GET_FORM_PROPERTY,
    SET_FORM_PROPERTIES,
    SET_MULTIPLE_FORM_PROPERTIES,
    GET_FORM_SUBMISSIONS,
    CREATE_FORM_SUBMISSION,
    CREATE_FORM_SUBMISSIONS,
    GET_FORM_FILES,
    GET_FORM_WEBHOOKS,
    CREATE_FORM_WEBHOOK,
    DELETE_FORM_WEBHOOK,
    GET_FORM_REPORTS,
    CREATE_REPORT,
    GET_SUBMISSION,
    EDIT_SUBMISSION,
    DELETE_SUBMISSION,
    GET_REPORT,
    DELETE_REPORT,
    GET_FOLDER,
    GET_PLAN,
];

/// Look an operation up by name.
pub fn endpoint(name: &str) -> Option<&'static Endpoint> {
    ENDPOINTS.iter().find(|e| e.name == name)
}
