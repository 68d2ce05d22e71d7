use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMSC.RU account login.
///
/// Invariant: non-empty after trimming.
pub struct Login(String);

impl Login {
    /// Query parameter name used by SMSC.RU (`login`).
    pub const FIELD: &'static str = "login";

    /// Create a validated [`Login`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated login.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// SMSC.RU account password (`psw`).
///
/// The service accepts either the plain password or the lowercase MD5 hex digest of it.
/// Plain passwords must not be empty (whitespace is preserved and allowed); hashes must be
/// exactly 32 lowercase hex characters.
pub struct Password {
    value: String,
    md5: bool,
}

impl Password {
    /// Query parameter name used by SMSC.RU (`psw`).
    pub const FIELD: &'static str = "psw";

    const MD5_HEX_LEN: usize = 32;

    /// Create a validated plain-text [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self { value, md5: false })
    }

    /// Create a [`Password`] from a precomputed lowercase MD5 hex digest.
    pub fn md5_hex(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let well_formed = trimmed.len() == Self::MD5_HEX_LEN
            && trimmed
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !well_formed {
            return Err(ValidationError::InvalidPasswordHash);
        }
        Ok(Self {
            value: trimmed.to_owned(),
            md5: true,
        })
    }

    /// Whether this value is an MD5 digest rather than the plain password.
    pub fn is_md5(&self) -> bool {
        self.md5
    }

    /// Borrow the value exactly as it is sent.
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("value", &"<redacted>")
            .field("md5", &self.md5)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender name shown on the recipient's phone (`sender`).
///
/// Invariant: non-empty after trimming. Names must be registered in the SMSC.RU account.
pub struct SenderId(String);

impl SenderId {
    /// Query parameter name used by SMSC.RU (`sender`).
    pub const FIELD: &'static str = "sender";

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`mes`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Query parameter name used by SMSC.RU (`mes`).
    pub const FIELD: &'static str = "mes";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Caller-chosen message id (`id`), used later to query delivery status.
///
/// Invariant: non-empty after trimming.
pub struct MessageId(String);

impl MessageId {
    /// Query parameter name used by SMSC.RU (`id`).
    pub const FIELD: &'static str = "id";

    /// Create a validated [`MessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for MessageId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated phone number as sent to SMSC.RU (one entry of `phones`).
///
/// Invariant: non-empty after trimming and free of the list separators `;` and `,`.
/// This type does not normalize; if you want E.164 normalization, parse into
/// [`PhoneNumber`] and convert it into [`RawPhoneNumber`].
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Query parameter name used by SMSC.RU (`phones`).
    pub const FIELD: &'static str = "phones";

    /// Separator placed between numbers in the `phones` parameter.
    pub const SEPARATOR: &'static str = ";";

    /// Create a validated (non-empty, single) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if trimmed.contains([';', ',']) {
            return Err(ValidationError::InvalidPhoneNumber {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to SMSC.RU.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// Convert an already-parsed phone number to a normalized raw value (E.164).
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Query parameter name used by SMSC.RU (`phones`).
    pub const FIELD: &'static str = "phones";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Timezone of the `time` parameter in hours relative to Moscow (`tz`).
///
/// Invariant: `-15..=11` (UTC-12 to UTC+14). Zero means Moscow time and is sent explicitly;
/// leaving the offset unset uses the timezone from the account settings.
pub struct TimezoneOffset(i8);

impl TimezoneOffset {
    /// Query parameter name used by SMSC.RU (`tz`).
    pub const FIELD: &'static str = "tz";

    /// Minimum allowed offset.
    pub const MIN: i8 = -15;
    /// Maximum allowed offset.
    pub const MAX: i8 = 11;

    /// Moscow time.
    pub const MOSCOW: Self = Self(0);

    /// Create a validated offset.
    pub fn new(hours: i8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&hours) {
            return Err(ValidationError::TimezoneOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: hours,
            });
        }
        Ok(Self(hours))
    }

    /// Get the offset in hours.
    pub fn hours(self) -> i8 {
        self.0
    }
}
