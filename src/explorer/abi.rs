//! Solidity ABI encoding for constructor arguments.
//!
//! The verification service re-runs the compiler and appends the encoded
//! constructor arguments to reproduce the exact deployed bytecode, so the
//! encoding here must match what deployment tooling produced: one 32-byte
//! head word per argument, with dynamic values (bytes, string) placed in a
//! trailing section and referenced by offset.

/// Errors that can occur while encoding constructor arguments.
#[derive(Debug, thiserror::Error)]
pub enum AbiError {
    #[error("invalid address literal: {input}")]
    InvalidAddress { input: String },
}

/// A single constructor argument value.
///
/// Covers the argument types deployment scripts pass in practice. Unsigned
/// integers encode as `uint256`; address literals accept an optional `0x`
/// prefix and are validated at encode time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    /// Unsigned integer, encoded as uint256
    Uint(u128),
    /// Address literal, 40 hex digits with optional 0x prefix
    Address(String),
    /// Boolean, encoded as uint256 zero or one
    Bool(bool),
    /// Dynamic byte string
    Bytes(Vec<u8>),
    /// UTF-8 string
    String(String),
}

impl AbiValue {
    fn is_dynamic(&self) -> bool {
        matches!(self, AbiValue::Bytes(_) | AbiValue::String(_))
    }
}

/// Encodes an ordered argument list with standard head/tail layout.
///
/// Static values occupy their head word directly; dynamic values put the
/// tail offset in the head word and a length-prefixed, 32-byte-padded
/// payload in the tail.
///
/// # Errors
/// - `AbiError::InvalidAddress` - Malformed address literal
pub fn encode_constructor_args(args: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    let head_len = args.len() * 32;
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for arg in args {
        match arg {
            AbiValue::Uint(value) => head.extend_from_slice(&uint_word(*value)),
            AbiValue::Address(literal) => head.extend_from_slice(&address_word(literal)?),
            AbiValue::Bool(flag) => head.extend_from_slice(&uint_word(u128::from(*flag))),
            AbiValue::Bytes(data) => {
                head.extend_from_slice(&uint_word((head_len + tail.len()) as u128));
                append_dynamic(&mut tail, data);
            }
            AbiValue::String(text) => {
                head.extend_from_slice(&uint_word((head_len + tail.len()) as u128));
                append_dynamic(&mut tail, text.as_bytes());
            }
        }
    }

    head.extend_from_slice(&tail);
    Ok(head)
}

/// Encodes an argument list as lowercase hex without the `0x` prefix,
/// the form verification APIs expect.
///
/// # Errors
/// - `AbiError::InvalidAddress` - Malformed address literal
pub fn encode_hex(args: &[AbiValue]) -> Result<String, AbiError> {
    Ok(hex::encode(encode_constructor_args(args)?))
}

/// Right-aligned big-endian word, zero-padded on the left.
fn uint_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

fn address_word(literal: &str) -> Result<[u8; 32], AbiError> {
    let digits = literal.strip_prefix("0x").unwrap_or(literal);
    if digits.len() != 40 {
        return Err(AbiError::InvalidAddress {
            input: literal.to_string(),
        });
    }

    let raw = hex::decode(digits).map_err(|_| AbiError::InvalidAddress {
        input: literal.to_string(),
    })?;

    let mut word = [0u8; 32];
    word[12..].copy_from_slice(&raw);
    Ok(word)
}

/// Length word followed by the payload padded up to a 32-byte boundary.
fn append_dynamic(tail: &mut Vec<u8>, data: &[u8]) {
    tail.extend_from_slice(&uint_word(data.len() as u128));
    tail.extend_from_slice(data);
    let remainder = data.len() % 32;
    if remainder != 0 {
        tail.extend(std::iter::repeat_n(0u8, 32 - remainder));
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_encode_uint() {
        let encoded = encode_constructor_args(&[AbiValue::Uint(1000)]).unwrap();
        assert_eq!(encoded.len(), 32);
        assert_eq!(&encoded[30..], &[0x03, 0xe8]);
        assert!(encoded[..30].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_encode_address_left_pads_to_word() {
        let encoded = encode_constructor_args(&[AbiValue::Address(
            "0x0123456789abcdef0123456789abcdef01234567".to_string(),
        )])
        .unwrap();
        assert_eq!(encoded.len(), 32);
        assert!(encoded[..12].iter().all(|&b| b == 0));
        assert_eq!(encoded[12], 0x01);
        assert_eq!(encoded[31], 0x67);
    }

    #[test]
    fn test_encode_bool() {
        let encoded = encode_constructor_args(&[AbiValue::Bool(true), AbiValue::Bool(false)])
            .unwrap();
        assert_eq!(encoded.len(), 64);
        assert_eq!(encoded[31], 1);
        assert_eq!(encoded[63], 0);
    }

    #[test]
    fn test_encode_string_uses_offset_and_length() {
        let encoded =
            encode_constructor_args(&[AbiValue::String("abc".to_string())]).unwrap();
        // Head word points at the tail, which starts right after the head
        assert_eq!(encoded.len(), 96);
        assert_eq!(encoded[31], 32);
        // Length word
        assert_eq!(encoded[63], 3);
        // Payload padded to a full word
        assert_eq!(&encoded[64..67], b"abc");
        assert!(encoded[67..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_encode_mixed_static_and_dynamic() {
        let encoded = encode_constructor_args(&[
            AbiValue::Uint(7),
            AbiValue::Bytes(vec![0xaa; 33]),
            AbiValue::Bool(true),
        ])
        .unwrap();

        // Head: 3 words. Tail: length word + 33 bytes padded to 64.
        assert_eq!(encoded.len(), 96 + 32 + 64);
        // Offset for the bytes argument counts from the start of the head
        assert_eq!(encoded[63], 96);
        assert_eq!(encoded[127], 33);
        assert_eq!(encoded[128], 0xaa);
        assert_eq!(encoded[160], 0xaa);
        assert_eq!(encoded[161], 0);
    }

    #[test]
    fn test_encode_hex_has_no_prefix() {
        let hex_blob = encode_hex(&[AbiValue::Uint(1000)]).unwrap();
        assert_eq!(hex_blob.len(), 64);
        assert!(hex_blob.ends_with("03e8"));
        assert!(!hex_blob.starts_with("0x"));
    }

    #[test]
    fn test_encode_empty_args_is_empty() {
        assert!(encode_constructor_args(&[]).unwrap().is_empty());
        assert_eq!(encode_hex(&[]).unwrap(), "");
    }

    #[test]
    fn test_invalid_address_literal_is_rejected() {
        let result = encode_constructor_args(&[AbiValue::Address("0x1234".to_string())]);
        assert!(matches!(
            result.unwrap_err(),
            AbiError::InvalidAddress { input } if input == "0x1234"
        ));

        let result =
            encode_constructor_args(&[AbiValue::Address("not hex at all, wrong too".to_string())]);
        assert!(result.is_err());
    }

    fn arb_abi_value() -> impl Strategy<Value = AbiValue> {
        prop_oneof![
            any::<u128>().prop_map(AbiValue::Uint),
            any::<bool>().prop_map(AbiValue::Bool),
            prop::collection::vec(any::<u8>(), 0..80).prop_map(AbiValue::Bytes),
            ".{0,40}".prop_map(AbiValue::String),
            prop::array::uniform20(any::<u8>())
                .prop_map(|bytes| AbiValue::Address(format!("0x{}", hex::encode(bytes)))),
        ]
    }

    proptest! {
        #[test]
        fn encoding_is_word_aligned(args in prop::collection::vec(arb_abi_value(), 0..8)) {
            let encoded = encode_constructor_args(&args).unwrap();
            prop_assert_eq!(encoded.len() % 32, 0);
            prop_assert!(encoded.len() >= args.len() * 32);
        }

        #[test]
        fn dynamic_offsets_stay_in_bounds(args in prop::collection::vec(arb_abi_value(), 1..8)) {
            let encoded = encode_constructor_args(&args).unwrap();
            for (i, arg) in args.iter().enumerate() {
                if arg.is_dynamic() {
                    let word = &encoded[i * 32..(i + 1) * 32];
                    let offset = u128::from_be_bytes(word[16..].try_into().unwrap()) as usize;
                    prop_assert!(offset >= args.len() * 32);
                    prop_assert!(offset + 32 <= encoded.len());
                }
            }
        }
    }
}
