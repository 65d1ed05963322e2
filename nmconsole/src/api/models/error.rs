use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while reading or updating NetworkManager state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NmError {
    /// A D-Bus communication error occurred.
    #[error("D-Bus error: {0}")]
    Dbus(#[from] zbus::Error),

    /// A value could not be converted to or from its D-Bus representation.
    #[error("variant conversion failed: {0}")]
    Variant(#[from] zvariant::Error),

    /// A D-Bus call failed; `context` names the operation.
    #[error("{context}: {source}")]
    DbusOperation {
        context: String,
        #[source]
        source: zbus::Error,
    },

    /// No connection profile has the given UUID.
    #[error("couldn't find connection profile with UUID {0}")]
    ProfileNotFound(Uuid),

    /// No device has the given IP interface name.
    #[error("couldn't find device {0}")]
    DeviceNotFound(String),

    /// A required settings field is absent.
    #[error("no {0}")]
    MissingField(String),

    /// A settings field holds a value of the wrong D-Bus type.
    #[error("{field} has unexpected type {signature}")]
    UnexpectedType { field: String, signature: String },

    #[error("couldn't parse UUID {raw}: {source}")]
    InvalidUuid {
        raw: String,
        #[source]
        source: uuid::Error,
    },

    #[error("couldn't parse IP address {0}")]
    InvalidAddress(String),

    #[error("key {0} doesn't have a section")]
    InvalidSettingsKey(String),

    /// An enumeration value is unknown; holds the value's description.
    #[error("{0}")]
    InvalidEnum(String),

    #[error("{value} is outside the allowed range [{min}, {max}]")]
    OutOfRange { value: i64, min: i64, max: i64 },

    #[error("couldn't parse {raw:?} as an integer: {source}")]
    InvalidInteger {
        raw: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("checkbox value {value:?} must be either {on:?} or {off:?}")]
    InvalidCheckbox {
        value: String,
        on: &'static str,
        off: &'static str,
    },

    #[error("SSID is {0} bytes long, but it may be at most 32 bytes")]
    SsidTooLong(usize),

    #[error("Wi-Fi channel {0} can only be set together with a Wi-Fi band")]
    ChannelWithoutBand(u32),

    #[error("unknown update type {0:?}")]
    UnknownUpdateKind(String),

    /// A submitted form value failed validation.
    #[error("invalid value {value:?} for {key}: {source}")]
    InvalidSetting {
        key: String,
        value: String,
        #[source]
        source: Box<NmError>,
    },

    /// An error wrapped with a description of what was being attempted.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<NmError>,
    },

    #[error("reload of connection profiles encountered an unexpected failure")]
    ReloadFailed,

    #[error("operation was cancelled")]
    Cancelled,
}

/// Broad classes of [`NmError`], independent of any wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A UUID or interface doesn't resolve to a remote object.
    NotFound,
    /// Remote data is missing a required field or has the wrong type.
    Decode,
    /// Operator input was rejected before any remote call.
    Validation,
    /// NetworkManager rejected a call or the bus failed.
    Remote,
    Cancelled,
}

impl NmError {
    /// Wraps the error with a description of the failed operation.
    pub fn context(self, context: impl Into<String>) -> Self {
        NmError::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error beneath any context wrapping.
    pub fn root(&self) -> &NmError {
        match self {
            NmError::Context { source, .. } | NmError::InvalidSetting { source, .. } => {
                source.root()
            }
            other => other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            NmError::Context { source, .. } => source.kind(),
            NmError::InvalidSetting { .. } => ErrorKind::Validation,
            NmError::ProfileNotFound(_) | NmError::DeviceNotFound(_) => ErrorKind::NotFound,
            NmError::MissingField(_)
            | NmError::UnexpectedType { .. }
            | NmError::InvalidUuid { .. }
            | NmError::InvalidAddress(_) => ErrorKind::Decode,
            NmError::InvalidSettingsKey(_)
            | NmError::InvalidEnum(_)
            | NmError::OutOfRange { .. }
            | NmError::InvalidInteger { .. }
            | NmError::InvalidCheckbox { .. }
            | NmError::SsidTooLong(_)
            | NmError::ChannelWithoutBand(_)
            | NmError::UnknownUpdateKind(_) => ErrorKind::Validation,
            NmError::Dbus(_)
            | NmError::Variant(_)
            | NmError::DbusOperation { .. }
            | NmError::ReloadFailed => ErrorKind::Remote,
            NmError::Cancelled => ErrorKind::Cancelled,
        }
    }
}

/// Adds [`NmError::context`] to results.
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T, NmError>;

    fn with_context<C, F>(self, f: F) -> Result<T, NmError>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T, E: Into<NmError>> ResultExt<T> for Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T, NmError> {
        self.map_err(|e| e.into().context(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, NmError>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.into().context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_keeps_kind_and_message() {
        let err = NmError::MissingField("ID".into())
            .context("couldn't parse 'connection' section")
            .context("couldn't dump connection profile /a/b");
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(
            err.to_string(),
            "couldn't dump connection profile /a/b: couldn't parse 'connection' section: no ID"
        );
        assert!(matches!(err.root(), NmError::MissingField(name) if name == "ID"));
    }

    #[test]
    fn invalid_setting_is_validation() {
        let err = NmError::InvalidSetting {
            key: "802-11-wireless.channel".into(),
            value: "6".into(),
            source: Box::new(NmError::ChannelWithoutBand(6)),
        };
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("channel 6"));
    }

    #[test]
    fn result_ext_wraps_errors() {
        let res: Result<(), NmError> = Err(NmError::Cancelled);
        let err = res.with_context(|| "rescan of wlan0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
        assert_eq!(err.to_string(), "rescan of wlan0: operation was cancelled");
    }

    #[test]
    fn not_found_kind() {
        assert_eq!(
            NmError::ProfileNotFound(Uuid::nil()).kind(),
            ErrorKind::NotFound
        );
    }
}
