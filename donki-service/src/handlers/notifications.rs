use crate::error::DonkiError;
use crate::models::EnrichedNotification;
use crate::startup::AppState;
use axum::{
    extract::{Query, State},
    Json,
};

pub const WELCOME_MESSAGE: &str = "Welcome to the NASA DONKI Microservice!";

/// First `type` value in the query string. Repeats are ignored rather than
/// rejected, so any query string reaches the fetcher.
fn first_type_param(pairs: Vec<(String, String)>) -> Option<String> {
    pairs
        .into_iter()
        .find_map(|(key, value)| (key == "type").then_some(value))
}

pub async fn index() -> &'static str {
    WELCOME_MESSAGE
}

pub async fn donki_notifications(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<EnrichedNotification>>, DonkiError> {
    let message_type = first_type_param(pairs);

    tracing::info!(
        message_type = message_type.as_deref().unwrap_or("-"),
        "Fetch request received for DONKI notifications"
    );

    let notifications = state
        .fetcher
        .fetch_notifications(message_type.as_deref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error in /donki-notifications route");
            e
        })?;

    tracing::info!(
        count = notifications.len(),
        "Returning DONKI notifications data"
    );
    tracing::debug!(notifications = ?notifications, "DONKI notifications payload");

    Ok(Json(notifications))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn absent_type_is_none() {
        assert_eq!(first_type_param(pairs(&[("other", "x")])), None);
    }

    #[test]
    fn empty_type_is_kept() {
        assert_eq!(first_type_param(pairs(&[("type", "")])), Some(String::new()));
    }

    #[test]
    fn repeated_type_keeps_first() {
        assert_eq!(
            first_type_param(pairs(&[("type", "CME"), ("type", "FLR")])),
            Some("CME".to_string())
        );
    }
}
