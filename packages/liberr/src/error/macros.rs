//! Macros for error creation and handling

/// Leaf error with a formatted message and the caller's stack
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)*) => {
        $crate::errorf(format_args!($($arg)*))
    };
}

/// Wrap an `Option<Error>` with a formatted message, capturing a stack on first wrap
#[macro_export]
macro_rules! wrapf {
    ($err:expr, $($arg:tt)*) => {
        $crate::wrapf($err, format_args!($($arg)*))
    };
}

/// Return early with a formatted leaf error
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::errorf!($($arg)*).into())
    };
}

/// Bail unless a condition holds
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            $crate::bail!($($arg)*);
        }
    };
}
