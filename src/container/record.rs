//! Chunk record framing.
//!
//! Chunk records follow the header back to back, with no padding and no
//! trailer after the last record:
//!
//! ```text
//! [encrypted length L: 4 bytes BE][chunk nonce: 12 bytes][payload: L bytes]
//! ```
//!
//! `L` covers the ciphertext plus its 16-byte tag, so it always equals
//! the chunk's cleartext length + 16.

use crate::crypto::aead::TAG_LEN;
use crate::crypto::schedule::CHUNK_NONCE_LEN;
use crate::errors::{Result, SkitaError};

/// Bytes of framing per record before the payload (length + nonce).
pub const RECORD_PREFIX_LEN: usize = 4 + CHUNK_NONCE_LEN;

/// Append one framed chunk record to `out`.
pub fn write_record(out: &mut Vec<u8>, nonce: &[u8; CHUNK_NONCE_LEN], payload: &[u8]) -> Result<()> {
    let len = u32::try_from(payload.len()).map_err(|_| {
        SkitaError::InputTooLarge(format!(
            "encrypted chunk of {} bytes exceeds the 32-bit length field",
            payload.len()
        ))
    })?;

    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(nonce);
    out.extend_from_slice(payload);
    Ok(())
}

/// Sequential reader over the chunk records of a container body.
///
/// Borrows the container bytes; payloads are returned as subslices, so
/// reading allocates nothing.
pub struct RecordReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> RecordReader<'a> {
    /// Start reading records at `offset` (the end of the header).
    pub fn new(data: &'a [u8], offset: usize) -> Self {
        Self { data, offset }
    }

    /// Read the next record.  `index` is only used in error messages.
    pub fn next_record(&mut self, index: u32) -> Result<([u8; CHUNK_NONCE_LEN], &'a [u8])> {
        let prefix_end = self.offset + RECORD_PREFIX_LEN;
        if prefix_end > self.data.len() {
            return Err(SkitaError::MalformedHeader(format!(
                "chunk {index}: record framing extends past the end of the container"
            )));
        }

        let len = u32::from_be_bytes([
            self.data[self.offset],
            self.data[self.offset + 1],
            self.data[self.offset + 2],
            self.data[self.offset + 3],
        ]) as usize;

        if len < TAG_LEN {
            return Err(SkitaError::MalformedHeader(format!(
                "chunk {index}: encrypted length {len} is shorter than the tag"
            )));
        }

        let mut nonce = [0u8; CHUNK_NONCE_LEN];
        nonce.copy_from_slice(&self.data[self.offset + 4..prefix_end]);

        let payload_end = prefix_end + len;
        if payload_end > self.data.len() {
            return Err(SkitaError::MalformedHeader(format!(
                "chunk {index}: encrypted length {len} extends past the end of the container"
            )));
        }

        let payload = &self.data[prefix_end..payload_end];
        self.offset = payload_end;
        Ok((nonce, payload))
    }

    /// After the final record, verify nothing trails the container.
    pub fn finish(self) -> Result<()> {
        if self.offset != self.data.len() {
            return Err(SkitaError::MalformedHeader(format!(
                "{} trailing bytes after the final chunk record",
                self.data.len() - self.offset
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_single_record() {
        let nonce = [0xABu8; CHUNK_NONCE_LEN];
        let payload = vec![0x5A; 21]; // 5 cleartext + 16 tag

        let mut buf = Vec::new();
        write_record(&mut buf, &nonce, &payload).unwrap();
        assert_eq!(buf.len(), RECORD_PREFIX_LEN + payload.len());

        let mut reader = RecordReader::new(&buf, 0);
        let (read_nonce, read_payload) = reader.next_record(0).unwrap();
        assert_eq!(read_nonce, nonce);
        assert_eq!(read_payload, payload.as_slice());
        reader.finish().unwrap();
    }

    #[test]
    fn records_are_contiguous() {
        let mut buf = Vec::new();
        write_record(&mut buf, &[1u8; CHUNK_NONCE_LEN], &[0u8; TAG_LEN + 3]).unwrap();
        write_record(&mut buf, &[2u8; CHUNK_NONCE_LEN], &[0u8; TAG_LEN]).unwrap();

        let mut reader = RecordReader::new(&buf, 0);
        let (nonce_a, payload_a) = reader.next_record(0).unwrap();
        assert_eq!(nonce_a, [1u8; CHUNK_NONCE_LEN]);
        assert_eq!(payload_a.len(), TAG_LEN + 3);

        let (nonce_b, payload_b) = reader.next_record(1).unwrap();
        assert_eq!(nonce_b, [2u8; CHUNK_NONCE_LEN]);
        assert_eq!(payload_b.len(), TAG_LEN);

        reader.finish().unwrap();
    }

    #[test]
    fn truncated_prefix_is_rejected() {
        let buf = [0u8; RECORD_PREFIX_LEN - 1];
        let mut reader = RecordReader::new(&buf, 0);
        assert!(matches!(
            reader.next_record(0),
            Err(SkitaError::MalformedHeader(_))
        ));
    }

    #[test]
    fn length_shorter_than_tag_is_rejected() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&(TAG_LEN as u32 - 1).to_be_bytes());
        buf.extend_from_slice(&[0u8; CHUNK_NONCE_LEN]);
        buf.extend_from_slice(&[0u8; TAG_LEN - 1]);

        let mut reader = RecordReader::new(&buf, 0);
        assert!(matches!(
            reader.next_record(0),
            Err(SkitaError::MalformedHeader(_))
        ));
    }

    #[test]
    fn length_past_end_is_rejected() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&100u32.to_be_bytes());
        buf.extend_from_slice(&[0u8; CHUNK_NONCE_LEN]);
        buf.extend_from_slice(&[0u8; 10]); // far fewer than 100 bytes

        let mut reader = RecordReader::new(&buf, 0);
        assert!(matches!(
            reader.next_record(3),
            Err(SkitaError::MalformedHeader(_))
        ));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut buf = Vec::new();
        write_record(&mut buf, &[0u8; CHUNK_NONCE_LEN], &[0u8; TAG_LEN]).unwrap();
        buf.push(0xFF);

        let mut reader = RecordReader::new(&buf, 0);
        reader.next_record(0).unwrap();
        assert!(reader.finish().is_err());
    }
}
