//! Typed Rust client for the SMSC.RU `send.php` HTTP API.
//!
//! The crate is split into a domain layer of strong types (the options catalog, send-time
//! encodings, messages), a transport layer that turns them into query parameters, and a
//! small blocking client that issues one GET per message and hands back the raw response.
//!
//! ```rust,no_run
//! use smsc::{Auth, Message, MessageText, RawPhoneNumber, SmscClient, TimeSpec, Translit};
//!
//! fn main() -> Result<(), smsc::SmscError> {
//!     let client = SmscClient::new(Auth::new("login", "password")?);
//!     let message = Message::builder(vec![RawPhoneNumber::new("+79251234567")?])
//!         .text(MessageText::new("hello")?)
//!         .translit(Translit::Latin)
//!         .time(TimeSpec::Delay(10))
//!         .build()?;
//!     for result in client.send(&[message]) {
//!         println!("{}", result?.body);
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Auth, SmscClient, SmscClientBuilder, SmscError};
pub use domain::{
    Charset, Message, MessageBuilder, MessageId, MessageText, MessageType, Password, PhoneNumber,
    RawPhoneNumber, ResponseBadPhones, ResponseCost, ResponseFormat, ResponseVerbose,
    SendDefaults, SendResponse, SendTime, SenderId, TimeRange, TimeSpec, TimezoneOffset, TinyUrl,
    Translit, ValidationError,
};
