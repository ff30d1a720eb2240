/*!
 * Record Codec
 * Fixed-width text encoding of metric records for the hand-off channel
 *
 * Wire form: `"<label> = <value>.\n"` padded with NUL bytes to the record
 * capacity. Values use the shortest decimal that round-trips the f64.
 */

use super::types::ChannelError;
use crate::core::limits::RECORD_PAD_BYTE;
use crate::scheduler::MetricRecord;

const SEPARATOR: &str = " = ";
const TERMINATOR: &str = ".\n";

/// Encode `record` into exactly `capacity` bytes
pub fn encode(record: &MetricRecord, capacity: usize) -> Result<Vec<u8>, ChannelError> {
    if record.label.is_empty()
        || record
            .label
            .bytes()
            .any(|b| b == RECORD_PAD_BYTE || b == b'\n')
    {
        return Err(ChannelError::InvalidLabel(format!("{:?}", record.label)));
    }

    let mut bytes = format!("{}{}{}{}", record.label, SEPARATOR, record.value, TERMINATOR)
        .into_bytes();
    if bytes.len() > capacity {
        return Err(ChannelError::RecordTooLarge {
            size: bytes.len(),
            capacity,
        });
    }

    bytes.resize(capacity, RECORD_PAD_BYTE);
    Ok(bytes)
}

/// Decode one fixed-width slot
pub fn decode(slot: &[u8]) -> Result<MetricRecord, ChannelError> {
    let end = slot
        .iter()
        .position(|&b| b == RECORD_PAD_BYTE)
        .unwrap_or(slot.len());

    let text = std::str::from_utf8(&slot[..end])
        .map_err(|e| ChannelError::Corrupt(format!("invalid UTF-8: {}", e)))?;

    let body = text
        .strip_suffix(TERMINATOR)
        .ok_or_else(|| ChannelError::Corrupt(format!("missing terminator in {:?}", text)))?;

    let (label, value) = body
        .rsplit_once(SEPARATOR)
        .ok_or_else(|| ChannelError::Corrupt(format!("missing separator in {:?}", text)))?;

    let value = value
        .parse::<f64>()
        .map_err(|e| ChannelError::Corrupt(format!("bad value {:?}: {}", value, e)))?;

    Ok(MetricRecord::new(label, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_pads_to_capacity() {
        let record = MetricRecord::new("Average turnaround time", 12.0);
        let bytes = encode(&record, 64).unwrap();

        assert_eq!(bytes.len(), 64);
        assert!(bytes.starts_with(b"Average turnaround time = 12.\n"));
        assert!(bytes[30..].iter().all(|&b| b == RECORD_PAD_BYTE));
    }

    #[test]
    fn test_decode_is_lossless() {
        let value = 47.0 / 7.0;
        let record = MetricRecord::new("Average waiting time", value);
        let decoded = decode(&encode(&record, 64).unwrap()).unwrap();

        assert_eq!(decoded.label, "Average waiting time");
        assert_eq!(decoded.value.to_bits(), value.to_bits());
    }

    #[test]
    fn test_exact_fit_and_overflow() {
        let record = MetricRecord::new("x", 1.5);
        // "x = 1.5.\n" is 9 bytes
        assert_eq!(encode(&record, 9).unwrap(), b"x = 1.5.\n".to_vec());
        assert_eq!(
            encode(&record, 8),
            Err(ChannelError::RecordTooLarge {
                size: 9,
                capacity: 8
            })
        );
    }

    #[test]
    fn test_label_with_separator() {
        let record = MetricRecord::new("a = b", 2.0);
        let decoded = decode(&encode(&record, 32).unwrap()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_rejects_bad_labels() {
        assert!(matches!(
            encode(&MetricRecord::new("two\nlines", 1.0), 64),
            Err(ChannelError::InvalidLabel(_))
        ));
        assert!(matches!(
            encode(&MetricRecord::new("", 1.0), 64),
            Err(ChannelError::InvalidLabel(_))
        ));
    }

    #[test]
    fn test_decode_corrupt() {
        assert!(matches!(decode(b"garbage"), Err(ChannelError::Corrupt(_))));
        assert!(matches!(
            decode(b"label = abc.\n\0\0"),
            Err(ChannelError::Corrupt(_))
        ));
        assert!(matches!(decode(&[0xff, 0xfe]), Err(ChannelError::Corrupt(_))));
    }
}
