//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//!
//! Used by the scanner to keep token construction terse.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's literal text
/// * `$start` - Byte offset where the token starts
/// * `$end` - Byte offset one past the end of the token
///
/// Offsets past `u32::MAX` (sources over 4 GiB) saturate to `u32::MAX`
/// instead of wrapping.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Integer, "42".to_string(), 0, 2);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $start:expr, $end:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: Span {
                start: Position(u32::try_from($start).unwrap_or(u32::MAX)),
                end: Position(u32::try_from($end).unwrap_or(u32::MAX)),
            },
        }
    };
}
