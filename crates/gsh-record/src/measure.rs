//! Serialized-size meter.
//!
//! Gatherers ship snapshots and diff batches over transports with payload
//! limits. These helpers report the encoded JSON length of any serializable
//! value without materializing the string.

use std::io;

use serde::Serialize;

/// Sink that counts bytes and throws them away.
struct ByteMeter {
    written: usize,
}

impl io::Write for ByteMeter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Length in bytes of `value` encoded as compact JSON.
pub fn measure_json_size<T: Serialize>(value: &T) -> serde_json::Result<usize> {
    let mut meter = ByteMeter { written: 0 };
    serde_json::to_writer(&mut meter, value)?;
    Ok(meter.written)
}

/// Length in bytes of `value` encoded as pretty-printed JSON.
pub fn measure_json_size_pretty<T: Serialize>(value: &T) -> serde_json::Result<usize> {
    let mut meter = ByteMeter { written: 0 };
    serde_json::to_writer_pretty(&mut meter, value)?;
    Ok(meter.written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn matches_to_vec_length() {
        let doc = json!({"name": "srv-1", "tags": ["a", "b"], "cpu": 4});
        let expected = serde_json::to_vec(&doc).unwrap().len();
        assert_eq!(measure_json_size(&doc).unwrap(), expected);
    }

    #[test]
    fn pretty_is_at_least_compact() {
        let doc = json!({"nested": {"deep": [1, 2, 3]}});
        let compact = measure_json_size(&doc).unwrap();
        let pretty = measure_json_size_pretty(&doc).unwrap();
        assert!(pretty >= compact);
    }

    #[test]
    fn scalar_sizes() {
        assert_eq!(measure_json_size(&json!(null)).unwrap(), 4);
        assert_eq!(measure_json_size(&json!(true)).unwrap(), 4);
        assert_eq!(measure_json_size(&json!("ab")).unwrap(), 4);
    }
}
