//! Error macros for gradebridge

/// Macro for bailing out on malformed input
#[macro_export]
macro_rules! bail_malformed {
    ($source:expr, $($reason:tt)+) => {
        return Err($crate::error::GradebridgeError::malformed(
            $source,
            format!($($reason)+),
        ))
    };
}

/// Macro for bailing out on a missing column
#[macro_export]
macro_rules! bail_missing_column {
    ($source:expr, $column:expr) => {
        return Err($crate::error::GradebridgeError::missing_column(
            $source, $column,
        ))
    };
}

/// Macro for creating invalid value errors
#[macro_export]
macro_rules! bail_invalid {
    ($context:expr, $value:expr) => {
        return Err($crate::error::GradebridgeError::invalid_value(
            $context, $value,
        ))
    };
}
