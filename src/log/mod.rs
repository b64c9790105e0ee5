//! Log record codec.
//!
//! Record layout: `timestamp(4) | kind+length(1) | payload | checksum(1)`.
//! The checksum is the XOR of every record byte preceding it. The stream is
//! closed by the shared 4-byte terminator; because decoding peeks 4 bytes to
//! detect it, a timestamp of `0xffffffff` is unrepresentable and rejected at
//! encode time.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use crate::{
    format::{pack_kind_len, unpack_kind_len, EventKind, LogEntry, MAX_PAYLOAD_SIZE, TERMINATOR},
    util::{checksum, decode_fixed32, extend_fixed32, Result, VdrError},
};

/// Timestamp plus the kind/length byte.
const RECORD_PREFIX_SIZE: usize = 5;

/// Fixed bytes around the payload: prefix plus the checksum byte.
pub const RECORD_OVERHEAD: usize = RECORD_PREFIX_SIZE + 1;

/// Encode one record, checksum included.
pub fn encode_record(timestamp: u32, kind: EventKind, payload: &[u8]) -> Result<Vec<u8>> {
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(VdrError::PayloadTooLarge {
            got: payload.len(),
            max: MAX_PAYLOAD_SIZE,
        });
    }
    if timestamp == u32::MAX {
        return Err(VdrError::invalid_input(
            "timestamp 0xffffffff is reserved for the terminator",
        ));
    }
    let mut dst = Vec::with_capacity(RECORD_OVERHEAD + payload.len());
    extend_fixed32(&mut dst, timestamp);
    dst.push(pack_kind_len(kind, payload.len()));
    let crc = checksum::extend(checksum::value(&dst), payload);
    dst.extend_from_slice(payload);
    dst.push(crc);
    Ok(dst)
}

/// Decode the record starting at `offset`.
///
/// Returns `Ok(None)` when the 4 bytes at `offset` are the terminator (end of
/// stream, not an error), otherwise the entry plus the offset past its
/// checksum byte. The checksum is verified on every read.
pub fn decode_record(input: &[u8], offset: usize) -> Result<Option<(LogEntry, usize)>> {
    let remain = input.len().saturating_sub(offset);
    if remain < TERMINATOR.len() {
        return Err(VdrError::truncated("log stream ends without a terminator"));
    }
    if input[offset..offset + TERMINATOR.len()] == TERMINATOR {
        return Ok(None);
    }
    if remain < RECORD_PREFIX_SIZE {
        return Err(VdrError::truncated("record shorter than its fixed prefix"));
    }
    let (kind, len) = unpack_kind_len(input[offset + 4]);
    if remain < RECORD_OVERHEAD + len {
        return Err(VdrError::Truncated(format!(
            "record declares a {len}-byte payload, {} bytes remain",
            remain - RECORD_PREFIX_SIZE
        )));
    }
    let body = &input[offset..offset + RECORD_PREFIX_SIZE + len];
    let stored = input[offset + RECORD_PREFIX_SIZE + len];
    let computed = checksum::value(body);
    if stored != computed {
        return Err(VdrError::ChecksumMismatch { stored, computed });
    }
    let entry = LogEntry {
        timestamp: decode_fixed32(body),
        kind,
        payload: body[RECORD_PREFIX_SIZE..].to_vec(),
    };
    Ok(Some((entry, offset + RECORD_OVERHEAD + len)))
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::env::{SequentialFile, WritableFile};
    use crate::header::encode_header;

    /// In-memory `WritableFile` over a shared buffer, so tests can inspect
    /// and corrupt what the writer produced.
    struct SharedDest {
        contents: Rc<RefCell<Vec<u8>>>,
    }

    impl SharedDest {
        fn new(contents: Rc<RefCell<Vec<u8>>>) -> Self {
            Self { contents }
        }
    }

    impl WritableFile for SharedDest {
        fn append(&mut self, data: &[u8]) -> Result<()> {
            self.contents.borrow_mut().extend_from_slice(data);
            Ok(())
        }

        fn close(&mut self) -> Result<()> {
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn sync(&mut self) -> Result<()> {
            Ok(())
        }
    }

    /// In-memory `SequentialFile` over a byte vector.
    struct SliceSource {
        contents: Vec<u8>,
    }

    impl SliceSource {
        fn new(contents: Vec<u8>) -> Self {
            Self { contents }
        }
    }

    impl SequentialFile for SliceSource {
        fn read(&mut self, dst: &mut [u8]) -> Result<usize> {
            let read_size = self.contents.len().min(dst.len());
            dst[..read_size].copy_from_slice(&self.contents[..read_size]);
            self.contents.drain(..read_size);
            Ok(read_size)
        }
    }

    fn sample_record() -> Vec<u8> {
        encode_record(1700000000, EventKind::Position, &[0x12, 0x34, 0x56, 0x78]).unwrap()
    }

    #[test]
    fn test_record_layout() {
        let record = sample_record();
        assert_eq!(RECORD_OVERHEAD + 4, record.len());
        assert_eq!(1700000000u32.to_le_bytes(), record[..4]);
        assert_eq!(pack_kind_len(EventKind::Position, 4), record[4]);
        assert_eq!(&[0x12, 0x34, 0x56, 0x78], &record[5..9]);
        assert_eq!(checksum::value(&record[..9]), record[9]);
    }

    #[test]
    fn test_record_round_trip() {
        let mut stream = sample_record();
        stream.extend_from_slice(&TERMINATOR);
        let (entry, offset) = decode_record(&stream, 0).unwrap().unwrap();
        assert_eq!(1700000000, entry.timestamp);
        assert_eq!(EventKind::Position, entry.kind);
        assert_eq!(vec![0x12, 0x34, 0x56, 0x78], entry.payload);
        assert_eq!(None, decode_record(&stream, offset).unwrap());
    }

    #[test]
    fn test_record_empty_payload_round_trip() {
        let record = encode_record(0, EventKind::Note, &[]).unwrap();
        assert_eq!(RECORD_OVERHEAD, record.len());
        let (entry, offset) = decode_record(&record, 0).unwrap().unwrap();
        assert_eq!(LogEntry::new(0, EventKind::Note, &[]), entry);
        assert_eq!(record.len(), offset);
    }

    #[test]
    fn test_record_max_payload_round_trip() {
        let payload = vec![0xab; MAX_PAYLOAD_SIZE];
        let record = encode_record(1, EventKind::Custom, &payload).unwrap();
        let (entry, _) = decode_record(&record, 0).unwrap().unwrap();
        assert_eq!(payload, entry.payload);
    }

    #[test]
    fn test_record_payload_too_large() {
        let payload = vec![0; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(
            VdrError::PayloadTooLarge {
                got: MAX_PAYLOAD_SIZE + 1,
                max: MAX_PAYLOAD_SIZE
            },
            encode_record(1, EventKind::Custom, &payload).unwrap_err()
        );
    }

    #[test]
    fn test_record_reserved_timestamp() {
        let error = encode_record(u32::MAX, EventKind::Note, &[]).unwrap_err();
        assert!(error.is_invalid_input());
    }

    #[test]
    fn test_record_single_bit_corruption() {
        // Flipping any bit of the timestamp, the kind bits, or the payload
        // leaves the declared length intact, so the checksum must catch it.
        let record = sample_record();
        let covered: Vec<usize> = (0..4).chain(5..9).collect();
        for index in covered {
            for bit in 0..8 {
                let mut corrupt = record.clone();
                corrupt[index] ^= 1 << bit;
                let error = decode_record(&corrupt, 0).unwrap_err();
                assert!(
                    error.is_checksum_mismatch(),
                    "byte {index} bit {bit}: {error}"
                );
            }
        }
        // Kind bits of the kind/length byte.
        for bit in 5..8 {
            let mut corrupt = record.clone();
            corrupt[4] ^= 1 << bit;
            assert!(decode_record(&corrupt, 0).unwrap_err().is_checksum_mismatch());
        }
        // Length bits change the covered range; still never Ok.
        for bit in 0..5 {
            let mut corrupt = record.clone();
            corrupt[4] ^= 1 << bit;
            assert!(decode_record(&corrupt, 0).is_err(), "length bit {bit}");
        }
    }

    #[test]
    fn test_record_corrupted_checksum_byte() {
        let mut record = sample_record();
        let last = record.len() - 1;
        record[last] ^= 0x01;
        assert!(decode_record(&record, 0).unwrap_err().is_checksum_mismatch());
    }

    #[test]
    fn test_record_truncated() {
        let record = sample_record();
        // Too short even for the terminator peek.
        for len in 0..TERMINATOR.len() {
            assert!(decode_record(&record[..len], 0).unwrap_err().is_truncated());
        }
        // Prefix present, payload or checksum missing.
        for len in RECORD_PREFIX_SIZE..record.len() {
            assert!(decode_record(&record[..len], 0).unwrap_err().is_truncated());
        }
    }

    #[test]
    fn test_record_stream_round_trip() {
        let entries = [
            LogEntry::new(100, EventKind::Note, b"departure"),
            LogEntry::new(200, EventKind::SpeedChange, &[10]),
            LogEntry::new(300, EventKind::Alarm, &[]),
        ];
        let mut stream = vec![];
        for entry in &entries {
            stream.extend_from_slice(
                &encode_record(entry.timestamp, entry.kind, &entry.payload).unwrap(),
            );
        }
        stream.extend_from_slice(&TERMINATOR);

        let mut offset = 0;
        for expected in &entries {
            let (entry, next) = decode_record(&stream, offset).unwrap().unwrap();
            assert_eq!(*expected, entry);
            offset = next;
        }
        assert_eq!(None, decode_record(&stream, offset).unwrap());
    }

    #[test]
    fn test_writer_reader_round_trip() {
        let contents = Rc::new(RefCell::new(
            encode_header("Example Vessel", 1234567, &crate::format::default_speed_table())
                .unwrap(),
        ));
        let mut writer = Writer::new(Box::new(SharedDest::new(contents.clone())));
        writer
            .add_record(100, EventKind::EngineStatus, b"started")
            .unwrap();
        writer.add_record(200, EventKind::HeadingChange, &[90]).unwrap();
        writer.finish().unwrap();

        let bytes = contents.borrow().clone();
        let mut reader = Reader::new(Box::new(SliceSource::new(bytes))).unwrap();
        assert_eq!("EXAMPLE VESSEL", reader.header().ship_name);
        assert_eq!(
            LogEntry::new(100, EventKind::EngineStatus, b"started"),
            reader.read_record().unwrap().unwrap()
        );
        assert_eq!(
            LogEntry::new(200, EventKind::HeadingChange, &[90]),
            reader.read_record().unwrap().unwrap()
        );
        assert_eq!(None, reader.read_record().unwrap());
        // Reads at end of stream keep returning None.
        assert_eq!(None, reader.read_record().unwrap());
    }

    #[test]
    fn test_writer_rejects_after_finish() {
        let contents = Rc::new(RefCell::new(vec![]));
        let mut writer = Writer::new(Box::new(SharedDest::new(contents)));
        writer.finish().unwrap();
        let error = writer.add_record(1, EventKind::Note, &[]).unwrap_err();
        assert!(error.is_invalid_input());
    }

    #[test]
    fn test_reader_empty_log() {
        let mut bytes =
            encode_header("Tug", 42, &crate::format::default_speed_table()).unwrap();
        bytes.extend_from_slice(&TERMINATOR);
        let mut reader = Reader::new(Box::new(SliceSource::new(bytes))).unwrap();
        assert_eq!(42, reader.header().imo_number);
        assert_eq!(None, reader.read_record().unwrap());
    }

    #[test]
    fn test_reader_missing_log_terminator() {
        // Header only: the log section never got its terminator.
        let bytes = encode_header("Tug", 42, &[]).unwrap();
        let mut reader = Reader::new(Box::new(SliceSource::new(bytes))).unwrap();
        assert!(reader.read_record().unwrap_err().is_truncated());
    }

    #[test]
    fn test_reader_trailing_bytes_rejected() {
        let mut bytes = encode_header("Tug", 42, &[]).unwrap();
        bytes.extend_from_slice(&TERMINATOR);
        bytes.push(0x00);
        let mut reader = Reader::new(Box::new(SliceSource::new(bytes))).unwrap();
        let error = reader.read_record().unwrap_err();
        assert!(matches!(error, VdrError::MalformedHeader(_)));
    }

    #[test]
    fn test_reader_surfaces_corruption() {
        let mut bytes = encode_header("Tug", 42, &[]).unwrap();
        let record_start = bytes.len();
        bytes.extend_from_slice(&sample_record());
        bytes.extend_from_slice(&TERMINATOR);
        bytes[record_start] ^= 0x40;
        let mut reader = Reader::new(Box::new(SliceSource::new(bytes))).unwrap();
        assert!(reader.read_record().unwrap_err().is_checksum_mismatch());
    }
}
