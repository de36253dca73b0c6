//! Typed operations over the endpoint table.
//!
//! Each method picks its `Endpoint`, supplies path arguments and a payload,
//! and returns the response's `content`. IDs are the strings shown in the
//! provider's URLs and listings.

use serde_json::{json, Value};

use crate::client::JotformClient;
use crate::endpoints::{self as ep, Payload};
use crate::error::ApiError;
use crate::types::{HistoryQuery, ListQuery};

/// `content` of a provider response, absent when the envelope has none.
pub type Content = Result<Option<Value>, ApiError>;

impl JotformClient {
    // -----------------------------------------------------------------------
    // Account
    // -----------------------------------------------------------------------

    /// Account type, avatar, name, email, website and limits.
    pub fn get_user(&self) -> Content {
        self.dispatch(&ep::GET_USER, &[], Payload::None)
    }

    /// Submission and upload counts for the current month.
    pub fn get_usage(&self) -> Content {
        self.dispatch(&ep::GET_USAGE, &[], Payload::None)
    }

    pub fn get_forms(&self, query: &ListQuery) -> Content {
        self.dispatch(&ep::GET_FORMS, &[], Payload::Conditions(query))
    }

    pub fn get_submissions(&self, query: &ListQuery) -> Content {
        self.dispatch(&ep::GET_SUBMISSIONS, &[], Payload::Conditions(query))
    }

    pub fn get_subusers(&self) -> Content {
        self.dispatch(&ep::GET_SUBUSERS, &[], Payload::None)
    }

    pub fn get_folders(&self) -> Content {
        self.dispatch(&ep::GET_FOLDERS, &[], Payload::None)
    }

    pub fn get_reports(&self) -> Content {
        self.dispatch(&ep::GET_REPORTS, &[], Payload::None)
    }

    /// Time zone and language.
    pub fn get_settings(&self) -> Content {
        self.dispatch(&ep::GET_SETTINGS, &[], Payload::None)
    }

    /// `settings` is a flat object of setting name to new value.
    pub fn update_settings(&self, settings: &Value) -> Content {
        self.dispatch(&ep::UPDATE_SETTINGS, &[], Payload::Object(settings))
    }

    /// Activity log: form creation and edits, logins and similar events.
    pub fn get_history(&self, query: &HistoryQuery) -> Content {
        self.dispatch(&ep::GET_HISTORY, &[], Payload::History(query))
    }

    /// `details` carries `username`, `password` and `email`.
    pub fn register_user(&self, details: &Value) -> Content {
        self.dispatch(&ep::REGISTER_USER, &[], Payload::Object(details))
    }

    /// `credentials` carries `username`, `password`, and optionally
    /// `appName` and `access`.
    pub fn login_user(&self, credentials: &Value) -> Content {
        self.dispatch(&ep::LOGIN_USER, &[], Payload::Object(credentials))
    }

    pub fn logout_user(&self) -> Content {
        self.dispatch(&ep::LOGOUT_USER, &[], Payload::None)
    }

    /// Limits of a plan such as `FREE` or `GOLD`.
    pub fn get_plan(&self, plan_name: &str) -> Content {
        self.dispatch(&ep::GET_PLAN, &[plan_name], Payload::None)
    }

    // -----------------------------------------------------------------------
    // Forms
    // -----------------------------------------------------------------------

    pub fn get_form(&self, form_id: &str) -> Content {
        self.dispatch(&ep::GET_FORM, &[form_id], Payload::None)
    }

    pub fn delete_form(&self, form_id: &str) -> Content {
        self.dispatch(&ep::DELETE_FORM, &[form_id], Payload::None)
    }

    /// Create one form from a `questions` / `properties` / `emails` tree.
    pub fn create_form(&self, form: &Value) -> Content {
        self.dispatch(&ep::CREATE_FORM, &[], Payload::Object(form))
    }

    /// Create forms from a JSON document, sent whole as the query string.
    pub fn create_forms(&self, forms: &Value) -> Content {
        self.dispatch(&ep::CREATE_FORMS, &[], Payload::Document(forms))
    }

    pub fn clone_form(&self, form_id: &str) -> Content {
        self.dispatch(&ep::CLONE_FORM, &[form_id], Payload::None)
    }

    pub fn get_form_questions(&self, form_id: &str) -> Content {
        self.dispatch(&ep::GET_FORM_QUESTIONS, &[form_id], Payload::None)
    }

    pub fn get_form_question(&self, form_id: &str, question_id: &str) -> Content {
        self.dispatch(&ep::GET_FORM_QUESTION, &[form_id, question_id], Payload::None)
    }

    /// `question` is a flat object such as `{"type": "control_textbox"}`.
    pub fn create_form_question(&self, form_id: &str, question: &Value) -> Content {
        self.dispatch(&ep::CREATE_FORM_QUESTION, &[form_id], Payload::Object(question))
    }

    pub fn create_form_questions(&self, form_id: &str, questions: &Value) -> Content {
        self.dispatch(&ep::CREATE_FORM_QUESTIONS, &[form_id], Payload::Document(questions))
    }

    pub fn edit_form_question(&self, form_id: &str, question_id: &str, properties: &Value) -> Content {
        self.dispatch(
            &ep::EDIT_FORM_QUESTION,
            &[form_id, question_id],
            Payload::Object(properties),
        )
    }

    pub fn delete_form_question(&self, form_id: &str, question_id: &str) -> Content {
        self.dispatch(&ep::DELETE_FORM_QUESTION, &[form_id, question_id], Payload::None)
    }

    pub fn get_form_properties(&self, form_id: &str) -> Content {
        self.dispatch(&ep::GET_FORM_PROPERTIES, &[form_id], Payload::None)
    }

    pub fn get_form_property(&self, form_id: &str, property_key: &str) -> Content {
        self.dispatch(&ep::GET_FORM_PROPERTY, &[form_id, property_key], Payload::None)
    }

    pub fn set_form_properties(&self, form_id: &str, properties: &Value) -> Content {
        self.dispatch(&ep::SET_FORM_PROPERTIES, &[form_id], Payload::Object(properties))
    }

    pub fn set_multiple_form_properties(&self, form_id: &str, properties: &Value) -> Content {
        self.dispatch(
            &ep::SET_MULTIPLE_FORM_PROPERTIES,
            &[form_id],
            Payload::Document(properties),
        )
    }

    pub fn get_form_submissions(&self, form_id: &str, query: &ListQuery) -> Content {
        self.dispatch(&ep::GET_FORM_SUBMISSIONS, &[form_id], Payload::Conditions(query))
    }

    /// Submit answers keyed by question ID. Compound answers use
    /// `<qid>_<subfield>` keys, e.g. `3_first`.
    pub fn create_form_submission(&self, form_id: &str, submission: &Value) -> Content {
        self.dispatch(&ep::CREATE_FORM_SUBMISSION, &[form_id], Payload::Object(submission))
    }

    pub fn create_form_submissions(&self, form_id: &str, submissions: &Value) -> Content {
        self.dispatch(
            &ep::CREATE_FORM_SUBMISSIONS,
            &[form_id],
            Payload::Document(submissions),
        )
    }

    pub fn get_form_files(&self, form_id: &str) -> Content {
        self.dispatch(&ep::GET_FORM_FILES, &[form_id], Payload::None)
    }

    pub fn get_form_webhooks(&self, form_id: &str) -> Content {
        self.dispatch(&ep::GET_FORM_WEBHOOKS, &[form_id], Payload::None)
    }

    pub fn create_form_webhook(&self, form_id: &str, webhook_url: &str) -> Content {
        let params = json!({ "webhookURL": webhook_url });
        self.dispatch(&ep::CREATE_FORM_WEBHOOK, &[form_id], Payload::Object(&params))
    }

    pub fn delete_form_webhook(&self, form_id: &str, webhook_id: &str) -> Content {
        self.dispatch(&ep::DELETE_FORM_WEBHOOK, &[form_id, webhook_id], Payload::None)
    }

    pub fn get_form_reports(&self, form_id: &str) -> Content {
        self.dispatch(&ep::GET_FORM_REPORTS, &[form_id], Payload::None)
    }

    /// `report` carries `title`, `list_type` and optionally `fields`.
    pub fn create_report(&self, form_id: &str, report: &Value) -> Content {
        self.dispatch(&ep::CREATE_REPORT, &[form_id], Payload::Object(report))
    }

    // -----------------------------------------------------------------------
    // Submissions, reports, folders
    // -----------------------------------------------------------------------

    pub fn get_submission(&self, submission_id: &str) -> Content {
        self.dispatch(&ep::GET_SUBMISSION, &[submission_id], Payload::None)
    }

    /// Same key convention as `create_form_submission`; `created_at` is
    /// sent as-is.
    pub fn edit_submission(&self, submission_id: &str, submission: &Value) -> Content {
        self.dispatch(&ep::EDIT_SUBMISSION, &[submission_id], Payload::Object(submission))
    }

    pub fn delete_submission(&self, submission_id: &str) -> Content {
        self.dispatch(&ep::DELETE_SUBMISSION, &[submission_id], Payload::None)
    }

    pub fn get_report(&self, report_id: &str) -> Content {
        self.dispatch(&ep::GET_REPORT, &[report_id], Payload::None)
    }

    pub fn delete_report(&self, report_id: &str) -> Content {
        self.dispatch(&ep::DELETE_REPORT, &[report_id], Payload::None)
    }

    pub fn get_folder(&self, folder_id: &str) -> Content {
        self.dispatch(&ep::GET_FOLDER, &[folder_id], Payload::None)
    }
}
