//! Typed value encoding for the stream channel.
//!
//! Scalars go out as JSON text; the exact byte forms are a server contract
//! and must not drift. Raw buffers pass through untouched and get their
//! content type from the caller at the gateway.

/// A value to publish, consumed by one [`encode`](TypedValue::encode) call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypedValue<'a> {
    Int(i32),
    Bool(bool),
    Float(f32),
    Str(&'a str),
    Bytes(&'a [u8]),
}

impl TypedValue<'_> {
    /// Encode into the wire byte form. Total — never fails.
    ///
    /// - `Int` — canonical decimal text, `-` sign for negative.
    /// - `Bool` — literal `true` / `false`.
    /// - `Float` — fixed-point text with six fractional digits.
    /// - `Str` — the input wrapped in one literal `"` on each side. The
    ///   server requires bare strings to be quoted to parse as JSON string
    ///   literals. The content is copied, **not** escaped: an embedded `"`
    ///   in the input corrupts the wire value. This is the established wire
    ///   contract; do not substitute JSON escaping.
    /// - `Bytes` — passed through unmodified.
    pub fn encode(&self) -> Vec<u8> {
        match *self {
            Self::Int(v) => v.to_string().into_bytes(),
            Self::Bool(true) => b"true".to_vec(),
            Self::Bool(false) => b"false".to_vec(),
            Self::Float(v) => format!("{v:.6}").into_bytes(),
            Self::Str(s) => {
                let mut buf = Vec::with_capacity(s.len() + 2);
                buf.push(b'"');
                buf.extend_from_slice(s.as_bytes());
                buf.push(b'"');
                buf
            }
            Self::Bytes(b) => b.to_vec(),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_decimal_text() {
        assert_eq!(TypedValue::Int(0).encode(), b"0");
        assert_eq!(TypedValue::Int(42).encode(), b"42");
        assert_eq!(TypedValue::Int(-7).encode(), b"-7");
        assert_eq!(TypedValue::Int(i32::MIN).encode(), b"-2147483648");
        assert_eq!(TypedValue::Int(i32::MAX).encode(), b"2147483647");
    }

    #[test]
    fn bool_literals() {
        assert_eq!(TypedValue::Bool(true).encode(), b"true");
        assert_eq!(TypedValue::Bool(false).encode(), b"false");
    }

    #[test]
    fn float_six_fractional_digits() {
        assert_eq!(TypedValue::Float(27.5).encode(), b"27.500000");
        assert_eq!(TypedValue::Float(-0.25).encode(), b"-0.250000");
        assert_eq!(TypedValue::Float(0.0).encode(), b"0.000000");
    }

    #[test]
    fn string_literal_quote_wrap() {
        assert_eq!(TypedValue::Str("hello").encode(), b"\"hello\"");
        assert_eq!(TypedValue::Str("").encode(), b"\"\"");
    }

    #[test]
    fn string_output_is_input_plus_two() {
        let input = "a string with spaces";
        let out = TypedValue::Str(input).encode();
        assert_eq!(out.len(), input.len() + 2);
        assert_eq!(&out[1..out.len() - 1], input.as_bytes());
    }

    #[test]
    fn string_content_is_not_escaped() {
        // Known wire quirk: embedded quotes are copied verbatim.
        assert_eq!(TypedValue::Str("a\"b").encode(), b"\"a\"b\"");
    }

    #[test]
    fn bytes_pass_through() {
        let raw = [0xa1, 0x61, 0x71, 0x60];
        assert_eq!(TypedValue::Bytes(&raw).encode(), raw);
    }
}
