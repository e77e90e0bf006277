//! BCD digit decoding as used by SIM elementary files

/// Longest digit string a single decode may produce (ICCID fits in 20).
const MAX_DIGITS: usize = 31;

/// Decode a low-nibble-first BCD buffer into a digit string.
///
/// Nibbles are consumed low half first, then high half, up to `num_digits`
/// nibbles. A nibble of `0xF` is filler and terminates decoding early.
/// Output is capped at 31 digits.
pub fn decode_bcd(data: &[u8], num_digits: usize) -> String {
    let mut result = String::new();

    for i in 0..num_digits {
        let Some(byte) = data.get(i >> 1) else {
            break;
        };
        let nibble = if i & 1 == 1 { byte >> 4 } else { byte & 0x0f };
        if nibble == 0x0f {
            break;
        }
        result.push(char::from(b'0' + nibble));
        if result.len() == MAX_DIGITS {
            break;
        }
    }

    result
}

/// Encode a digit string into low-nibble-first BCD, filler-padded to `len` bytes.
pub fn encode_bcd(digits: &str, len: usize) -> Vec<u8> {
    let mut out = vec![0xffu8; len];
    for (i, c) in digits.chars().enumerate() {
        let Some(d) = c.to_digit(10) else { break };
        let byte = i >> 1;
        if byte >= len {
            break;
        }
        if i & 1 == 1 {
            out[byte] = (out[byte] & 0x0f) | ((d as u8) << 4);
        } else {
            out[byte] = 0xf0 | d as u8;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_low_nibble_first() {
        assert_eq!(decode_bcd(&[0x21, 0x43, 0xf5], 5), "12345");
    }

    #[test]
    fn test_decode_terminates_on_filler() {
        assert_eq!(decode_bcd(&[0x21, 0xf3], 4), "123");
        assert_eq!(decode_bcd(&[0xff, 0xff], 4), "");
    }

    #[test]
    fn test_decode_short_buffer() {
        assert_eq!(decode_bcd(&[0x21], 6), "12");
    }

    #[test]
    fn test_encode_round_trip() {
        let encoded = encode_bcd("12345", 3);
        assert_eq!(encoded, vec![0x21, 0x43, 0xf5]);
        assert_eq!(decode_bcd(&encoded, 6), "12345");
    }
}
