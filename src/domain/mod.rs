//! Domain layer: strong types with validation and invariants (no I/O).

mod options;
mod request;
mod response;
mod time;
mod validation;
mod value;

pub use options::{
    Charset, Contribution, MessageType, ParamValue, QueryOption, ResponseBadPhones, ResponseCost,
    ResponseFormat, ResponseVerbose, TinyUrl, Translit,
};
pub use request::{Message, MessageBuilder, MessageOptions, RESERVED_PARAMS, SendDefaults};
pub use response::SendResponse;
pub use time::{SendTime, TimeRange, TimeSpec};
pub use validation::ValidationError;
pub use value::{
    Login, MessageId, MessageText, Password, PhoneNumber, RawPhoneNumber, SenderId,
    TimezoneOffset,
};
