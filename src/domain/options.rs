//! Options catalog: closed sets of per-message switches understood by `send.php`.
//!
//! Every variant states its query contribution explicitly. The "no"/"off" variants are
//! not treated as absent and send their `0` value. [`MessageType::Text`] is the only
//! variant that contributes nothing.

use std::fmt;

/// Literal value of a query parameter contributed by an option variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamValue {
    Int(u8),
    Str(&'static str),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
        }
    }
}

/// A single `key=value` pair an option variant adds to the request.
pub type Contribution = (&'static str, ParamValue);

/// A selectable variant of one option category.
pub trait QueryOption: Copy {
    /// The parameter this variant adds to the request, or `None` if it adds nothing.
    fn contribution(self) -> Option<Contribution>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Transliteration of the message text (`translit`).
pub enum Translit {
    /// Send the text as is (`0`).
    #[default]
    No,
    /// Transliterate as "translit" (`1`).
    Latin,
    /// Transliterate as "mpaHc/Ium" (`2`).
    Imitate,
}

impl Translit {
    pub const FIELD: &'static str = "translit";
}

impl QueryOption for Translit {
    fn contribution(self) -> Option<Contribution> {
        let value = match self {
            Self::No => 0,
            Self::Latin => 1,
            Self::Imitate => 2,
        };
        Some((Self::FIELD, ParamValue::Int(value)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Encoding of the transmitted text (`charset`).
///
/// The service assumes `windows-1251` when the parameter is missing, but this crate always
/// sends the selected charset.
pub enum Charset {
    Windows1251,
    #[default]
    Utf8,
    Koi8R,
}

impl Charset {
    pub const FIELD: &'static str = "charset";
}

impl QueryOption for Charset {
    fn contribution(self) -> Option<Contribution> {
        let value = match self {
            Self::Windows1251 => "windows-1251",
            Self::Utf8 => "utf-8",
            Self::Koi8R => "koi8-r",
        };
        Some((Self::FIELD, ParamValue::Str(value)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Automatic link shortening with click tracking (`tinyurl`).
pub enum TinyUrl {
    #[default]
    No,
    Yes,
}

impl TinyUrl {
    pub const FIELD: &'static str = "tinyurl";
}

impl QueryOption for TinyUrl {
    fn contribution(self) -> Option<Contribution> {
        let value = match self {
            Self::No => 0,
            Self::Yes => 1,
        };
        Some((Self::FIELD, ParamValue::Int(value)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Shape of the server response (`fmt`).
pub enum ResponseFormat {
    /// `OK - 1 SMS, ID - 1234` (`0`).
    Text,
    /// Comma separated numbers, e.g. `1234,1` (`1`).
    Csv,
    /// XML document (`2`).
    Xml,
    /// JSON object (`3`).
    #[default]
    Json,
}

impl ResponseFormat {
    pub const FIELD: &'static str = "fmt";

    /// Map a raw `fmt` value back to its variant.
    pub fn from_param(value: &str) -> Option<Self> {
        Some(match value.trim() {
            "0" => Self::Text,
            "1" => Self::Csv,
            "2" => Self::Xml,
            "3" => Self::Json,
            _ => return None,
        })
    }
}

impl QueryOption for ResponseFormat {
    fn contribution(self) -> Option<Contribution> {
        let value = match self {
            Self::Text => 0,
            Self::Csv => 1,
            Self::Xml => 2,
            Self::Json => 3,
        };
        Some((Self::FIELD, ParamValue::Int(value)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Cost reporting (`cost`).
pub enum ResponseCost {
    /// Plain send (`0`).
    No,
    /// Only compute the cost, do not send anything (`1`).
    DryRun,
    /// Send and report the cost (`2`).
    Yes,
    /// Send and report the cost and the new account balance (`3`).
    #[default]
    WithBalance,
}

impl ResponseCost {
    pub const FIELD: &'static str = "cost";
}

impl QueryOption for ResponseCost {
    fn contribution(self) -> Option<Contribution> {
        let value = match self {
            Self::No => 0,
            Self::DryRun => 1,
            Self::Yes => 2,
            Self::WithBalance => 3,
        };
        Some((Self::FIELD, ParamValue::Int(value)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Include the list of rejected numbers with their statuses (`err`).
pub enum ResponseBadPhones {
    No,
    #[default]
    Yes,
}

impl ResponseBadPhones {
    pub const FIELD: &'static str = "err";
}

impl QueryOption for ResponseBadPhones {
    fn contribution(self) -> Option<Contribution> {
        let value = match self {
            Self::No => 0,
            Self::Yes => 1,
        };
        Some((Self::FIELD, ParamValue::Int(value)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Include per-number details: status, mcc/mnc, cost and error codes (`op`).
pub enum ResponseVerbose {
    No,
    #[default]
    Yes,
}

impl ResponseVerbose {
    pub const FIELD: &'static str = "op";
}

impl QueryOption for ResponseVerbose {
    fn contribution(self) -> Option<Contribution> {
        let value = match self {
            Self::No => 0,
            Self::Yes => 1,
        };
        Some((Self::FIELD, ParamValue::Int(value)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Kind of message; everything but [`MessageType::Text`] is sent as a `<flag>=1` parameter.
pub enum MessageType {
    #[default]
    Text,
    Flash,
    Push,
    /// HLR lookup instead of a message.
    Hlr,
    /// Silent reachability check.
    Ping,
}

impl QueryOption for MessageType {
    fn contribution(self) -> Option<Contribution> {
        let key = match self {
            Self::Text => return None,
            Self::Flash => "flash",
            Self::Push => "push",
            Self::Hlr => "hlr",
            Self::Ping => "ping",
        };
        Some((key, ParamValue::Int(1)))
    }
}
