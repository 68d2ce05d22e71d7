use std::collections::BTreeMap;

use crate::domain::options::{
    Charset, MessageType, ResponseBadPhones, ResponseCost, ResponseFormat, ResponseVerbose,
    TinyUrl, Translit,
};
use crate::domain::time::{SendTime, TimeSpec};
use crate::domain::validation::ValidationError;
use crate::domain::value::{
    Login, MessageId, MessageText, Password, RawPhoneNumber, SenderId, TimezoneOffset,
};

/// Parameters owned by the client and the message body; extras may not replace them.
pub const RESERVED_PARAMS: [&str; 4] = [
    Login::FIELD,
    Password::FIELD,
    RawPhoneNumber::FIELD,
    MessageText::FIELD,
];

/// Client-level option selections applied to every message that does not override them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SendDefaults {
    pub sender: Option<SenderId>,
    pub translit: Translit,
    pub charset: Charset,
    pub tinyurl: TinyUrl,
    pub response_format: ResponseFormat,
    pub response_cost: ResponseCost,
    pub response_bad_phones: ResponseBadPhones,
    pub response_verbose: ResponseVerbose,
}

/// Per-message overrides; `None` falls back to [`SendDefaults`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageOptions {
    pub message_type: MessageType,
    pub translit: Option<Translit>,
    pub charset: Option<Charset>,
    pub tinyurl: Option<TinyUrl>,
    pub response_format: Option<ResponseFormat>,
    pub response_cost: Option<ResponseCost>,
    pub response_bad_phones: Option<ResponseBadPhones>,
    pub response_verbose: Option<ResponseVerbose>,
}

/// One outbound send: recipients, text, and everything that shapes delivery and response.
///
/// Built through [`Message::builder`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    recipients: Vec<RawPhoneNumber>,
    text: Option<MessageText>,
    id: Option<MessageId>,
    sender: Option<SenderId>,
    time: Option<SendTime>,
    options: MessageOptions,
    extra: BTreeMap<String, String>,
}

impl Message {
    /// Plain text message with every option left at the client default.
    pub fn new(
        recipients: Vec<RawPhoneNumber>,
        text: MessageText,
    ) -> Result<Self, ValidationError> {
        Self::builder(recipients).text(text).build()
    }

    pub fn builder(recipients: Vec<RawPhoneNumber>) -> MessageBuilder {
        MessageBuilder::new(recipients)
    }

    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn text(&self) -> Option<&MessageText> {
        self.text.as_ref()
    }

    pub fn id(&self) -> Option<&MessageId> {
        self.id.as_ref()
    }

    pub fn sender(&self) -> Option<&SenderId> {
        self.sender.as_ref()
    }

    pub fn time(&self) -> Option<&SendTime> {
        self.time.as_ref()
    }

    pub fn options(&self) -> &MessageOptions {
        &self.options
    }

    pub fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }
}

#[derive(Debug, Clone)]
/// Builder for [`Message`].
///
/// Setters take already-validated values; cross-field checks run in [`MessageBuilder::build`]:
/// - at least one recipient,
/// - at most one send time,
/// - a timezone only together with a send time,
/// - no extra parameter named `login`, `psw`, `phones` or `mes`.
pub struct MessageBuilder {
    recipients: Vec<RawPhoneNumber>,
    text: Option<MessageText>,
    id: Option<MessageId>,
    sender: Option<SenderId>,
    time: Option<TimeSpec>,
    time_conflict: bool,
    timezone: Option<TimezoneOffset>,
    options: MessageOptions,
    extra: BTreeMap<String, String>,
}

impl MessageBuilder {
    pub fn new(recipients: Vec<RawPhoneNumber>) -> Self {
        Self {
            recipients,
            text: None,
            id: None,
            sender: None,
            time: None,
            time_conflict: false,
            timezone: None,
            options: MessageOptions::default(),
            extra: BTreeMap::new(),
        }
    }

    /// Add another recipient.
    pub fn to(mut self, phone: RawPhoneNumber) -> Self {
        self.recipients.push(phone);
        self
    }

    /// Message body. HLR and ping requests may leave it unset; `mes` is then sent empty.
    pub fn text(mut self, text: MessageText) -> Self {
        self.text = Some(text);
        self
    }

    pub fn id(mut self, id: MessageId) -> Self {
        self.id = Some(id);
        self
    }

    /// Override the client's default sender.
    pub fn sender(mut self, sender: SenderId) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Schedule the send. Setting it a second time makes [`MessageBuilder::build`] fail.
    pub fn time(mut self, spec: TimeSpec) -> Self {
        if self.time.is_some() {
            self.time_conflict = true;
        }
        self.time = Some(spec);
        self
    }

    /// Timezone of the send time.
    pub fn timezone(mut self, timezone: TimezoneOffset) -> Self {
        self.timezone = Some(timezone);
        self
    }

    pub fn message_type(mut self, message_type: MessageType) -> Self {
        self.options.message_type = message_type;
        self
    }

    pub fn translit(mut self, translit: Translit) -> Self {
        self.options.translit = Some(translit);
        self
    }

    pub fn charset(mut self, charset: Charset) -> Self {
        self.options.charset = Some(charset);
        self
    }

    pub fn tinyurl(mut self, tinyurl: TinyUrl) -> Self {
        self.options.tinyurl = Some(tinyurl);
        self
    }

    pub fn response_format(mut self, format: ResponseFormat) -> Self {
        self.options.response_format = Some(format);
        self
    }

    pub fn response_cost(mut self, cost: ResponseCost) -> Self {
        self.options.response_cost = Some(cost);
        self
    }

    pub fn response_bad_phones(mut self, bad_phones: ResponseBadPhones) -> Self {
        self.options.response_bad_phones = Some(bad_phones);
        self
    }

    pub fn response_verbose(mut self, verbose: ResponseVerbose) -> Self {
        self.options.response_verbose = Some(verbose);
        self
    }

    /// Raw parameter passed through as is. Extras are applied last and win over every option.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<Message, ValidationError> {
        if self.recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }
        if self.time_conflict {
            return Err(ValidationError::ConflictingTime);
        }
        let time = match (self.time, self.timezone) {
            (None, Some(_)) => return Err(ValidationError::TimezoneWithoutTime),
            (None, None) => None,
            (Some(spec), None) => Some(SendTime::new(spec)),
            (Some(spec), Some(tz)) => Some(SendTime::with_timezone(spec, tz)),
        };
        for key in self.extra.keys() {
            if key.trim().is_empty() {
                return Err(ValidationError::Empty { field: "extra" });
            }
            if RESERVED_PARAMS.iter().any(|reserved| key.as_str() == *reserved) {
                return Err(ValidationError::ReservedParam { key: key.clone() });
            }
        }

        Ok(Message {
            recipients: self.recipients,
            text: self.text,
            id: self.id,
            sender: self.sender,
            time,
            options: self.options,
            extra: self.extra,
        })
    }
}
