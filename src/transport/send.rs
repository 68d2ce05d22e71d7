use serde::de::DeserializeOwned;

use super::params::Params;
use crate::domain::{
    Message, MessageId, MessageText, QueryOption, RawPhoneNumber, SendDefaults, SenderId,
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode everything but the credentials.
///
/// Layers, later wins: message body, client defaults, message overrides, extras.
pub fn encode_send_query(defaults: &SendDefaults, message: &Message) -> Params {
    let mut params = Params::new();

    let phones = message
        .recipients()
        .iter()
        .map(RawPhoneNumber::raw)
        .collect::<Vec<_>>()
        .join(RawPhoneNumber::SEPARATOR);
    params.set(RawPhoneNumber::FIELD, phones);
    params.set(
        MessageText::FIELD,
        message.text().map(MessageText::as_str).unwrap_or_default(),
    );

    push_defaults(&mut params, defaults);
    push_overrides(&mut params, message);

    for (key, value) in message.extra() {
        params.set(key.as_str(), value.as_str());
    }

    params
}

fn push_defaults(params: &mut Params, defaults: &SendDefaults) {
    params.apply(defaults.translit.contribution());
    params.apply(defaults.tinyurl.contribution());
    params.apply(defaults.response_format.contribution());
    params.apply(defaults.response_cost.contribution());
    params.apply(defaults.response_bad_phones.contribution());
    params.apply(defaults.response_verbose.contribution());
    params.apply(defaults.charset.contribution());
    if let Some(sender) = defaults.sender.as_ref() {
        params.set(SenderId::FIELD, sender.as_str());
    }
}

fn push_overrides(params: &mut Params, message: &Message) {
    let options = message.options();
    params.apply(options.translit.and_then(QueryOption::contribution));
    params.apply(options.tinyurl.and_then(QueryOption::contribution));
    params.apply(options.response_format.and_then(QueryOption::contribution));
    params.apply(options.response_cost.and_then(QueryOption::contribution));
    params.apply(options.response_bad_phones.and_then(QueryOption::contribution));
    params.apply(options.response_verbose.and_then(QueryOption::contribution));
    params.apply(options.charset.and_then(QueryOption::contribution));
    params.apply(options.message_type.contribution());

    if let Some(sender) = message.sender() {
        params.set(SenderId::FIELD, sender.as_str());
    }
    if let Some(id) = message.id() {
        params.set(MessageId::FIELD, id.as_str());
    }
    if let Some(time) = message.time() {
        for (key, value) in time.params() {
            params.set(key, value);
        }
    }
}

/// Decode a `fmt=3` body into a caller-chosen type.
pub fn decode_json_body<T: DeserializeOwned>(body: &str) -> Result<T, TransportError> {
    Ok(serde_json::from_str(body)?)
}
