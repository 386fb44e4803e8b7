use std::path::PathBuf;

/// Process-level errors for Cascade: configuration, bootstrap and I/O.
///
/// Request validation failures never surface here; they are answered
/// with a `400` by the account service.
#[derive(Debug, thiserror::Error)]
pub enum CascadeError {
    #[error(
        "Config file not found: {path}\n\n  \
         Check the --config path, or drop the flag to use cascade.toml \
         from the working directory (optional)."
    )]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(
        "Cannot bind to {addr}: {reason}\n\n  \
         Solutions:\n    \
         → Pick another port: cascade serve --port <port>\n    \
         → Or set the PORT environment variable"
    )]
    BindFailed { addr: String, reason: String },

    #[error("Server error: {detail}")]
    ServerError { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CascadeError>;

/// Reasons a registration candidate is rejected, in the order they are checked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("Incorrect user format.  Exactly: 'email', 'password', 'phone' keys are needed.")]
    MalformedInput,

    #[error("Invalid email format.")]
    InvalidEmailFormat,

    #[error("Password must be string of at least 8 characters.")]
    WeakPassword,

    #[error("Phone number must be 10 digits with no spaces or special characters.")]
    InvalidPhoneFormat,

    #[error("Email already assigned to a user.")]
    DuplicateEmail,
}

/// Credential check failures.
///
/// The two causes stay distinct internally; callers must collapse them
/// into one externally visible outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("no account registered for this email")]
    UnknownEmail,

    #[error("password does not match")]
    WrongPassword,
}

/// Failures of a 14-digit `YYYYMMDDHHMMSS` timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("expected 14 digits, got {len} bytes")]
    WrongLength { len: usize },

    #[error("non-digit character at position {position}")]
    NonDigit { position: usize },
}

/// Failures of a `YYYYMMDDHHMMSS-YYYYMMDDHHMMSS` range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("expected 29 bytes, got {len}")]
    WrongLength { len: usize },

    #[error("expected '-' between the two timestamps")]
    MissingSeparator,

    #[error("invalid range start: {0}")]
    Start(#[source] TimestampError),

    #[error("invalid range end: {0}")]
    End(#[source] TimestampError),

    #[error("range start {start} is after range end {end}")]
    Inverted { start: String, end: String },
}

/// Log query validation failures, in the order they are checked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error(
        "'type' must be a string 'all' or an array of any of: 'USER ADDED', 'LOGIN', \
         'FAILED LOGIN', 'LOG REQUEST', 'FAILED LOG REQUEST', 'SESSION TIMEOUT'."
    )]
    InvalidTypeFilter,

    #[error("'filters' must include both: 'user', 'createdRange'.")]
    InvalidFilterKeys,

    #[error("'filters.user' must include a valid user email or 'all'.")]
    InvalidUserFilter,

    #[error(
        "'filters.createdRange' must be 'all' or in the format \
         'YYYYMMDDHHMMSS-YYYYMMDDHHMMSS' with the first time being earlier."
    )]
    InvalidRangeFilter(#[source] Option<RangeError>),
}

/// Rejections of a login request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Incorrect login format.  Exactly: 'type', 'email', 'password' keys are needed.")]
    MalformedInput,

    #[error("'type' must be 'LOGIN' to login.")]
    WrongType,

    #[error("Incorrect email password combination.")]
    Credentials(#[source] AuthError),
}

/// Rejections of an audit-log request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogRequestError {
    #[error(
        "Incorrect log request format.  Exactly: 'email', 'password', 'type', 'filters' \
         keys are needed."
    )]
    MalformedInput,

    #[error("Incorrect email password combination.")]
    Credentials(#[source] AuthError),

    #[error(transparent)]
    Query(#[from] QueryError),
}
