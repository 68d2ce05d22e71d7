use crate::domain::options::ResponseFormat;

/// Raw outcome of one `send.php` call.
///
/// The body is kept exactly as returned; its shape follows the `fmt` that was requested,
/// and service-level errors embedded in it are not interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendResponse {
    pub status: u16,
    pub format: ResponseFormat,
    pub body: String,
}
