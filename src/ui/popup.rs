/// Popup UI: extract the tweet, then ask for its sentiment

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use patternfly_yew::prelude::*;
use uuid::Uuid;
use crate::controller::{PopupAction, PopupModel, PopupState, ResultPanel};
use crate::messaging::{request_page_text, request_sentiment};
use crate::ui::components::{FailureNotice, SentimentBadge, TweetText};

#[function_component(App)]
pub fn app() -> Html {
    let model = use_reducer(PopupModel::default);

    // Extract tweet handler
    let on_extract = {
        let model = model.clone();

        Callback::from(move |_| {
            if !model.shows_extract_button() {
                return;
            }

            let cycle = Uuid::new_v4();
            model.dispatch(PopupAction::StartExtraction(cycle));

            let model = model.clone();
            spawn_local(async move {
                let response = request_page_text().await;
                model.dispatch(PopupAction::TextReceived(cycle, response));
            });
        })
    };

    // Sentiment handler
    let on_classify = {
        let model = model.clone();

        Callback::from(move |_| {
            let Some((cycle, text)) = model.classification_input() else {
                return;
            };

            model.dispatch(PopupAction::StartClassification(cycle));

            let model = model.clone();
            spawn_local(async move {
                let response = request_sentiment(text).await;
                model.dispatch(PopupAction::SentimentReceived(cycle, response));
            });
        })
    };

    let extract_label = match model.state {
        PopupState::Idle => "Extract Tweet",
        _ => "Extract Another Tweet",
    };

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Tweet Sentiment"}</h1>

            <div class="flex-column-gap">
                if model.shows_extract_button() {
                    <Button onclick={on_extract} variant={ButtonVariant::Primary} block={true}>
                        {extract_label}
                    </Button>
                }

                if let Some(text) = model.text_panel() {
                    if matches!(model.state, PopupState::ExtractFailed(_)) {
                        <FailureNotice message={text.to_string()} alert_type={AlertType::Warning} />
                    } else {
                        <TweetText text={text.to_string()} />
                    }
                }

                if model.shows_classify_button() {
                    <Button onclick={on_classify} variant={ButtonVariant::Secondary} block={true}>
                        {"Get Sentiment"}
                    </Button>
                }

                if model.is_waiting() {
                    <div class="loading-text-center">
                        <Spinner />
                    </div>
                }

                {match model.result_panel() {
                    Some(ResultPanel::Verdict(verdict)) => html! {
                        <SentimentBadge verdict={verdict.clone()} />
                    },
                    Some(ResultPanel::Failure(message)) => html! {
                        <FailureNotice message={message.to_string()} />
                    },
                    None => html! {},
                }}
            </div>

            <p class="footer-popup">
                {"Tweet Sentiment v0.1.0"}
            </p>
        </div>
    }
}
