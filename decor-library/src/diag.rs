use ecow::{EcoVec, eco_vec};
use std::fmt::{self, Display, Formatter};
use std::io;

/// Early-return with a [`StrResult`] or [`SourceResult`].
///
/// If called with just a string and format args, returns with a
/// `StrResult`. If called with an [`ErrorKind`], a string and format args,
/// returns a `SourceResult`.
///
/// You can also emit hints with the `; hint: "..."` syntax.
///
/// ```ignore
/// bail!("bailing with a {}", "string result");
/// bail!(ErrorKind::Argument, "bailing with a {}", "source result");
/// bail!(
///     ErrorKind::Argument, "bailing with a {}", "source result";
///     hint: "hint 1"
/// );
/// ```
#[macro_export]
#[doc(hidden)]
macro_rules! __bail {
    // For bail!("just a {}", "string")
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        return Err($crate::diag::error!($fmt $(, $arg)*))
    };

    // For bail!(error!(..))
    ($error:expr) => {
        return Err(::ecow::eco_vec![$error])
    };

    // For bail!(kind, ...)
    ($($tts:tt)*) => {
        return Err(::ecow::eco_vec![$crate::diag::error!($($tts)*)])
    };
}

/// Construct an [`EcoString`] or a [`Diagnostic`].
#[macro_export]
#[doc(hidden)]
macro_rules! __error {
    // For error!("just a {}", "string").
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::diag::eco_format!($fmt, $($arg),*)
    };

    // For error!(kind, ...)
    (
        $kind:expr, $fmt:literal $(, $arg:expr)*
        $(; hint: $hint:literal $(, $hint_arg:expr)*)*
        $(,)?
    ) => {
        $crate::diag::Diagnostic::new(
            $kind,
            $crate::diag::eco_format!($fmt, $($arg),*),
        ) $(.with_hint($crate::diag::eco_format!($hint, $($hint_arg),*)))*
    };
}

/// Return a [`ErrorKind::Precondition`] diagnostic unless the condition holds.
///
/// Precondition violations flag bugs in the callable that raised them. They
/// are never recovered by general purpose wrappers.
#[macro_export]
#[doc(hidden)]
macro_rules! __ensure {
    ($cond:expr $(,)?) => {
        if !$cond {
            return Err(::ecow::eco_vec![$crate::diag::Diagnostic::new(
                $crate::diag::ErrorKind::Precondition,
                concat!("precondition violated: ", stringify!($cond)),
            )]);
        }
    };
    ($cond:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        if !$cond {
            return Err(::ecow::eco_vec![$crate::diag::Diagnostic::new(
                $crate::diag::ErrorKind::Precondition,
                $crate::diag::eco_format!($fmt, $($arg),*),
            )]);
        }
    };
}

#[rustfmt::skip]
#[doc(inline)]
pub use {
    crate::__bail as bail,
    crate::__error as error,
    crate::__ensure as ensure,
    ecow::{eco_format, EcoString},
};

pub type SourceResult<T> = Result<T, EcoVec<Diagnostic>>;
pub type StrResult<T> = Result<T, EcoString>;

/// What went wrong during an invocation.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// An ordinary failure raised by a callable.
    Failure,
    /// An internal invariant of a callable did not hold.
    Precondition,
    /// Something that is not callable was invoked.
    NotCallable,
    /// A missing, unexpected or unreadable argument.
    Argument,
    /// A value had a different type than required.
    Type,
    /// A captured variable does not exist.
    Unbound,
    /// A captured variable was written but is immutable.
    Immutable,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Failure => "failure",
            ErrorKind::Precondition => "precondition violation",
            ErrorKind::NotCallable => "not callable",
            ErrorKind::Argument => "argument error",
            ErrorKind::Type => "type error",
            ErrorKind::Unbound => "unbound variable",
            ErrorKind::Immutable => "immutable variable",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub message: EcoString,
    pub hints: EcoVec<EcoString>,
}

impl Diagnostic {
    pub fn new<S>(kind: ErrorKind, message: S) -> Self
    where
        S: Into<EcoString>,
    {
        Self {
            kind,
            message: message.into(),
            hints: eco_vec!(),
        }
    }

    pub fn hint(&mut self, hint: impl Into<EcoString>) {
        self.hints.push(hint.into());
    }

    pub fn with_hint(mut self, hint: impl Into<EcoString>) -> Self {
        self.hint(hint);
        self
    }

    /// Fatal diagnostics terminate the operation and must not be recovered.
    pub fn is_fatal(&self) -> bool {
        self.kind == ErrorKind::Precondition
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Diagnostic {}

pub trait At<T> {
    fn at(self, kind: ErrorKind) -> SourceResult<T>;
}

impl<T, S> At<T> for Result<T, S>
where
    S: Into<EcoString>,
{
    fn at(self, kind: ErrorKind) -> SourceResult<T> {
        self.map_err(|msg| eco_vec![Diagnostic::new(kind, msg)])
    }
}

/// Whether any of the diagnostics must terminate the current operation.
pub fn is_fatal(errors: &[Diagnostic]) -> bool {
    errors.iter().any(Diagnostic::is_fatal)
}

/// Write diagnostics in a human readable form.
pub fn write_diagnostics(errors: &[Diagnostic], w: &mut impl io::Write) -> io::Result<()> {
    for error in errors {
        writeln!(w, "error[{}]: {}", error.kind, error.message)?;
        for hint in &error.hints {
            writeln!(w, "  = hint: {hint}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fails_with_kind() -> SourceResult<()> {
        bail!(ErrorKind::Argument, "missing argument `{}`", "x"; hint: "pass {} values", 1)
    }

    fn fails_with_str() -> StrResult<()> {
        bail!("plain {}", "message")
    }

    fn checks(value: i64) -> SourceResult<i64> {
        ensure!(value >= 0, "value {} is negative", value);
        Ok(value)
    }

    #[test]
    fn bail_builds_diagnostics() {
        let errors = fails_with_kind().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Argument);
        assert_eq!(errors[0].message.as_str(), "missing argument `x`");
        assert_eq!(errors[0].hints.as_slice(), &[EcoString::from("pass 1 values")]);

        assert_eq!(fails_with_str().unwrap_err().as_str(), "plain message");
    }

    #[test]
    fn ensure_raises_precondition() {
        assert_eq!(checks(3), Ok(3));
        let errors = checks(-1).unwrap_err();
        assert!(is_fatal(&errors));
        assert_eq!(errors[0].message.as_str(), "value -1 is negative");
    }

    #[test]
    fn at_attaches_kind() {
        let result: StrResult<()> = Err("boom".into());
        let errors = result.at(ErrorKind::Type).unwrap_err();
        assert_eq!(errors[0].kind, ErrorKind::Type);
        assert!(!errors[0].is_fatal());
    }

    #[test]
    fn writes_hints() {
        let errors = fails_with_kind().unwrap_err();
        let mut out = Vec::new();
        write_diagnostics(&errors, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "error[argument error]: missing argument `x`\n  = hint: pass 1 values\n"
        );
    }
}
