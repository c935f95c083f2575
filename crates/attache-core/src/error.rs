use std::fmt;

/// Return early with an ad-hoc [`Error`] built from format arguments.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Create an ad-hoc [`Error`] from format arguments.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur in Attache.
pub struct Error {
    kind: Box<ErrorKind>,
}

#[derive(Debug)]
enum ErrorKind {
    /// Catch-all for errors without a dedicated kind.
    Adhoc(String),

    /// Schema misconfiguration, reported when the schema is built, never at
    /// attribute access time.
    Schema(String),

    /// A record failed validation during save.
    Validation(String),

    /// A key lookup found nothing.
    RecordNotFound(String),

    /// A value could not be converted to the requested type.
    TypeConversion { value: String, target: &'static str },

    /// Bridge for errors produced outside this crate.
    Anyhow(anyhow::Error),
}

impl Error {
    #[doc(hidden)]
    pub fn from_args(args: fmt::Arguments<'_>) -> Self {
        ErrorKind::Adhoc(args.to_string()).into()
    }

    pub fn schema(msg: impl fmt::Display) -> Self {
        ErrorKind::Schema(msg.to_string()).into()
    }

    pub fn validation(msg: impl fmt::Display) -> Self {
        ErrorKind::Validation(msg.to_string()).into()
    }

    pub fn record_not_found(msg: impl fmt::Display) -> Self {
        ErrorKind::RecordNotFound(msg.to_string()).into()
    }

    pub fn type_conversion(value: &crate::stmt::Value, target: &'static str) -> Self {
        ErrorKind::TypeConversion {
            value: value.variant_name().to_string(),
            target,
        }
        .into()
    }

    pub fn is_schema(&self) -> bool {
        matches!(*self.kind, ErrorKind::Schema(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(*self.kind, ErrorKind::Validation(_))
    }

    pub fn is_record_not_found(&self) -> bool {
        matches!(*self.kind, ErrorKind::RecordNotFound(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use self::ErrorKind::*;

        match &*self.kind {
            Adhoc(msg) => f.write_str(msg),
            Schema(msg) => write!(f, "invalid schema: {msg}"),
            Validation(msg) => write!(f, "validation failed: {msg}"),
            RecordNotFound(msg) => write!(f, "record not found: {msg}"),
            TypeConversion { value, target } => {
                write!(f, "cannot convert {value} to {target}")
            }
            Anyhow(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.debug_struct("Error").field("kind", &self.kind).finish()
        } else {
            fmt::Display::fmt(self, f)
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &*self.kind {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind: Box::new(kind),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}
