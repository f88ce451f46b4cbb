/// Popup interaction state: extract, then classify.
///
/// The model is a `yew::Reducible` so the popup drives it with
/// `use_reducer`, but every transition is a plain function of
/// `(state, action)` and is tested without a browser.
use std::rc::Rc;
use uuid::Uuid;
use yew::Reducible;

use crate::config::{CLASSIFY_FAILED, EXTRACT_FAILED};
use crate::label::Verdict;
use crate::protocol::{ExtractResponse, SentimentResponse};

#[derive(Debug, Clone, PartialEq)]
pub enum PopupState {
    Idle,
    Extracting,
    ExtractFailed(String),
    Extracted { text: String },
    Classifying { text: String },
    Classified { text: String, verdict: Verdict },
    ClassifyFailed { text: String, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PopupAction {
    /// User asked for the tweet text; starts a new cycle
    StartExtraction(Uuid),
    /// Page inspector reply (`None` when the tab never answered)
    TextReceived(Uuid, Option<ExtractResponse>),
    /// User asked for a sentiment
    StartClassification(Uuid),
    /// Dispatcher reply (`None` when the background never answered)
    SentimentReceived(Uuid, Option<SentimentResponse>),
}

/// The one panel below the tweet text
#[derive(Debug, Clone, PartialEq)]
pub enum ResultPanel<'a> {
    Verdict(&'a Verdict),
    Failure(&'a str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupModel {
    pub state: PopupState,
    /// Cycle the outstanding request belongs to
    pub cycle: Option<Uuid>,
}

impl Default for PopupModel {
    fn default() -> Self {
        PopupModel {
            state: PopupState::Idle,
            cycle: None,
        }
    }
}

impl PopupModel {
    /// Apply one action. Actions that do not fit the current state, or
    /// replies from an earlier cycle, leave the model untouched.
    pub fn apply(&self, action: PopupAction) -> PopupModel {
        match action {
            PopupAction::StartExtraction(cycle) if self.shows_extract_button() => PopupModel {
                state: PopupState::Extracting,
                cycle: Some(cycle),
            },
            PopupAction::TextReceived(cycle, response) if self.expects(cycle, PopupState::is_extracting) => {
                let state = match response {
                    Some(response) if response.is_found() => PopupState::Extracted {
                        text: response.tweet_text,
                    },
                    Some(response) => PopupState::ExtractFailed(response.tweet_text),
                    None => PopupState::ExtractFailed(EXTRACT_FAILED.to_string()),
                };
                self.with_state(state)
            }
            PopupAction::StartClassification(cycle) if self.expects(cycle, PopupState::is_extracted) => {
                match &self.state {
                    PopupState::Extracted { text } => self.with_state(PopupState::Classifying { text: text.clone() }),
                    _ => self.clone(),
                }
            }
            PopupAction::SentimentReceived(cycle, response) if self.expects(cycle, PopupState::is_classifying) => {
                let text = self.text_panel().unwrap_or_default().to_string();
                let state = match response.as_ref().and_then(SentimentResponse::verdict) {
                    Some(verdict) => PopupState::Classified { text, verdict },
                    None => PopupState::ClassifyFailed {
                        text,
                        message: CLASSIFY_FAILED.to_string(),
                    },
                };
                self.with_state(state)
            }
            ignored => {
                log::debug!("Ignoring {:?} in {:?}", ignored, self.state);
                self.clone()
            }
        }
    }

    /// Text to send for classification, with the cycle it belongs to
    pub fn classification_input(&self) -> Option<(Uuid, String)> {
        match (&self.state, self.cycle) {
            (PopupState::Extracted { text }, Some(cycle)) => Some((cycle, text.clone())),
            _ => None,
        }
    }

    /// Offered at the start and again once a cycle has a sentiment result
    pub fn shows_extract_button(&self) -> bool {
        matches!(
            self.state,
            PopupState::Idle | PopupState::Classified { .. } | PopupState::ClassifyFailed { .. }
        )
    }

    pub fn shows_classify_button(&self) -> bool {
        matches!(self.state, PopupState::Extracted { .. })
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.state, PopupState::Extracting | PopupState::Classifying { .. })
    }

    /// Extracted text, or the reason extraction failed
    pub fn text_panel(&self) -> Option<&str> {
        match &self.state {
            PopupState::Idle | PopupState::Extracting => None,
            PopupState::ExtractFailed(message) => Some(message),
            PopupState::Extracted { text }
            | PopupState::Classifying { text }
            | PopupState::Classified { text, .. }
            | PopupState::ClassifyFailed { text, .. } => Some(text),
        }
    }

    pub fn result_panel(&self) -> Option<ResultPanel<'_>> {
        match &self.state {
            PopupState::Classified { verdict, .. } => Some(ResultPanel::Verdict(verdict)),
            PopupState::ClassifyFailed { message, .. } => Some(ResultPanel::Failure(message)),
            _ => None,
        }
    }

    fn expects(&self, cycle: Uuid, state: fn(&PopupState) -> bool) -> bool {
        self.cycle == Some(cycle) && state(&self.state)
    }

    fn with_state(&self, state: PopupState) -> PopupModel {
        PopupModel {
            state,
            cycle: self.cycle,
        }
    }
}

impl PopupState {
    fn is_extracting(&self) -> bool {
        matches!(self, PopupState::Extracting)
    }

    fn is_extracted(&self) -> bool {
        matches!(self, PopupState::Extracted { .. })
    }

    fn is_classifying(&self) -> bool {
        matches!(self, PopupState::Classifying { .. })
    }
}

impl Reducible for PopupModel {
    type Action = PopupAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = self.apply(action);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}
