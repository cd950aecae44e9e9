use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Code {
    /// Malformed pattern
    InvalidArgument,
    /// Input document could not be parsed
    Corruption,
    /// Value has no representation in the requested format
    NotSupported,
    IOError,
}

/// Error returned by pattern construction and document loading
///
/// A walk itself never fails; only building one or converting its input
/// and output does.
#[derive(Debug, Clone)]
pub struct Status {
    code: Code,
    message: String,
}

impl Status {
    fn new(code: Code, msg: impl Into<String>) -> Self {
        Status {
            code,
            message: msg.into(),
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Status::new(Code::InvalidArgument, msg)
    }

    pub fn corruption(msg: impl Into<String>) -> Self {
        Status::new(Code::Corruption, msg)
    }

    pub fn not_supported(msg: impl Into<String>) -> Self {
        Status::new(Code::NotSupported, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Status::new(Code::IOError, msg)
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.code == Code::InvalidArgument
    }

    pub fn is_corruption(&self) -> bool {
        self.code == Code::Corruption
    }

    pub fn is_not_supported(&self) -> bool {
        self.code == Code::NotSupported
    }

    pub fn is_io_error(&self) -> bool {
        self.code == Code::IOError
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for Status {}

impl From<std::io::Error> for Status {
    fn from(err: std::io::Error) -> Self {
        Status::io_error(err.to_string())
    }
}

/// Malformed JSON input is reported as corruption of the source document.
impl From<serde_json::Error> for Status {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Status::io_error(err.to_string())
        } else {
            Status::corruption(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Status>;
