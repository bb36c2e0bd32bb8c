use std::fmt::{Display, Formatter};

pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type Result<T> = std::result::Result<T, DynError>;

/// A failed remote call.
///
/// HTTP-level failures carry the status code the server answered with;
/// transport failures (DNS, refused connection, timeout) and undecodable
/// response bodies are reported as status 500.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchError {
    pub message: String,
    pub status: u16,
}

impl FetchError {
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    /// Transport-level or decode failure, always reported as status 500.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(message, 500)
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FetchError {}

/// A user identifier from the goto input or the command line that does not
/// parse as an unsigned integer. Never results in a request being issued.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidIdentifier(pub String);

impl Display for InvalidIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid user identifier: '{}'", self.0)
    }
}

impl std::error::Error for InvalidIdentifier {}
