//! Wire shapes exchanged between the widget, the popup and the worker
//!
//! Requests are tagged by an `action` string so they serialize to the same
//! JSON the extension contexts pass around.

use serde::{Deserialize, Serialize};

use crate::hints::HintSet;
use crate::problem::ProblemRecord;
use crate::storage::{HintUsage, ProblemProgress};

/// Which context handles a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The background worker
    Worker,
    /// The widget on the problem page
    Content,
}

/// Extra information sent along with a mentor question
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A request between contexts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    /// Record a revealed hint (worker, fire-and-forget)
    TrackHintUsage { data: HintUsage },
    /// Persist per-problem progress (worker, fire-and-forget)
    SaveProgress { data: ProblemProgress },
    /// Classify a problem and return its hints (worker, request/response)
    #[serde(rename_all = "camelCase")]
    GetProblemHints { problem_data: ProblemRecord },
    /// Answer a question (worker, request/response)
    AskMentorQuestion {
        question: String,
        #[serde(default)]
        context: MentorContext,
    },
    /// Minimize or restore the widget (content, fire-and-forget)
    ToggleWidget,
    /// Title of the problem on the page (content, request/response)
    GetCurrentProblem,
    /// Text selected when the context-menu entry was used (content, fire-and-forget)
    #[serde(rename_all = "camelCase")]
    AskAboutSelection { selected_text: String },
}

impl Request {
    /// The `action` tag
    pub fn action(&self) -> &'static str {
        match self {
            Self::TrackHintUsage { .. } => "trackHintUsage",
            Self::SaveProgress { .. } => "saveProgress",
            Self::GetProblemHints { .. } => "getProblemHints",
            Self::AskMentorQuestion { .. } => "askMentorQuestion",
            Self::ToggleWidget => "toggleWidget",
            Self::GetCurrentProblem => "getCurrentProblem",
            Self::AskAboutSelection { .. } => "askAboutSelection",
        }
    }

    /// Whether the sender waits for a [`Response`]
    pub fn expects_response(&self) -> bool {
        matches!(
            self,
            Self::GetProblemHints { .. } | Self::AskMentorQuestion { .. } | Self::GetCurrentProblem
        )
    }

    /// Which context handles this request
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::TrackHintUsage { .. }
            | Self::SaveProgress { .. }
            | Self::GetProblemHints { .. }
            | Self::AskMentorQuestion { .. } => Endpoint::Worker,
            Self::ToggleWidget | Self::GetCurrentProblem | Self::AskAboutSelection { .. } => {
                Endpoint::Content
            }
        }
    }
}

/// Reply to a request/response action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Hints {
        hints: HintSet,
    },
    MentorAnswer {
        response: String,
    },
    #[serde(rename_all = "camelCase")]
    CurrentProblem {
        problem_title: Option<String>,
    },
}
