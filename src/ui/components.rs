/// Reusable UI components

use yew::prelude::*;
use patternfly_yew::prelude::{Alert, AlertType};

use crate::label::Verdict;

#[derive(Properties, PartialEq)]
pub struct TweetTextProps {
    pub text: String,
}

#[function_component(TweetText)]
pub fn tweet_text(props: &TweetTextProps) -> Html {
    html! {
        <div class="tweet-text" id="tweet-text">
            {&props.text}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SentimentBadgeProps {
    pub verdict: Verdict,
}

#[function_component(SentimentBadge)]
pub fn sentiment_badge(props: &SentimentBadgeProps) -> Html {
    let label = &props.verdict.label;

    html! {
        <div class="sentiment" id="sentiment">
            <h3>{"Sentiment Analysis:"}</h3>
            <span class={label.css_class()}>{label.to_string()}</span>
            if let Some(score) = props.verdict.score_percent() {
                <span class="sentiment-score">{format!("({})", score)}</span>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FailureNoticeProps {
    pub message: String,
    #[prop_or(AlertType::Danger)]
    pub alert_type: AlertType,
}

#[function_component(FailureNotice)]
pub fn failure_notice(props: &FailureNoticeProps) -> Html {
    html! {
        <div class="failure-notice">
            <Alert r#type={props.alert_type.clone()} title={props.message.clone()} inline={true}>
            </Alert>
        </div>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::config::CLASSIFY_FAILED;
    use crate::label::SentimentLabel;
    use std::time::Duration;
    use wasm_bindgen_test::*;
    use web_sys::Element;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount_point() -> Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&root).unwrap();
        root
    }

    // Let the scheduler run the first render
    async fn settle() {
        yew::platform::time::sleep(Duration::ZERO).await;
    }

    #[wasm_bindgen_test]
    async fn test_badge_shows_label() {
        let root = mount_point();
        let verdict = Verdict::new(SentimentLabel::new("positive").unwrap(), None);
        yew::Renderer::<SentimentBadge>::with_root_and_props(root.clone(), SentimentBadgeProps { verdict })
            .render();
        settle().await;

        assert!(root.text_content().unwrap().contains("positive"));
        let badge = root.query_selector("span.positive").unwrap().unwrap();
        assert_eq!(badge.text_content().unwrap(), "positive");
    }

    #[wasm_bindgen_test]
    async fn test_badge_shows_score() {
        let root = mount_point();
        let verdict = Verdict::new(SentimentLabel::new("negative").unwrap(), Some(0.12));
        yew::Renderer::<SentimentBadge>::with_root_and_props(root.clone(), SentimentBadgeProps { verdict })
            .render();
        settle().await;

        assert!(root.text_content().unwrap().contains("(12%)"));
    }

    #[wasm_bindgen_test]
    async fn test_failure_notice_shows_message() {
        let root = mount_point();
        let props = FailureNoticeProps {
            message: CLASSIFY_FAILED.to_string(),
            alert_type: AlertType::Danger,
        };
        yew::Renderer::<FailureNotice>::with_root_and_props(root.clone(), props).render();
        settle().await;

        assert!(root.text_content().unwrap().contains(CLASSIFY_FAILED));
    }
}
