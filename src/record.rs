//! TFRecord container framing
//!
//! Each record is stored as `length (u64 LE)`, masked CRC32C of the length
//! bytes, the serialized `tf.train.Example` payload, and a masked CRC32C of
//! the payload. The mask matches TensorFlow's record writer.

use prost::Message;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::proto::Example;

const CRC_MASK_DELTA: u32 = 0xa282_ead8;

// TensorFlow's masked crc: rotate right by 15 bits and add a constant
fn masked_crc32c(bytes: &[u8]) -> u32 {
    let crc = crc32c::crc32c(bytes);
    ((crc >> 15) | (crc << 17)).wrapping_add(CRC_MASK_DELTA)
}

/// Writes framed `tf.train.Example` records to an underlying writer.
pub struct RecordWriter<W: Write> {
    writer: W,
}

impl RecordWriter<BufWriter<File>> {
    /// Create (or overwrite) a record file at the given path.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::from_writer(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> RecordWriter<W> {
    pub fn from_writer(writer: W) -> Self {
        RecordWriter { writer }
    }

    /// Serialize one example and append it to the file.
    pub fn send(&mut self, example: &Example) -> io::Result<()> {
        let payload = example.encode_to_vec();
        let length = (payload.len() as u64).to_le_bytes();
        self.writer.write_all(&length)?;
        self.writer.write_all(&masked_crc32c(&length).to_le_bytes())?;
        self.writer.write_all(&payload)?;
        self.writer.write_all(&masked_crc32c(&payload).to_le_bytes())?;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Iterator over the examples stored in a TFRecord file.
///
/// Verifies both checksums per record; yields an error on truncation or
/// mismatch.
pub struct RecordReader<R: Read> {
    reader: R,
}

impl RecordReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::from_reader(BufReader::new(File::open(path)?)))
    }
}

impl<R: Read> RecordReader<R> {
    pub fn from_reader(reader: R) -> Self {
        RecordReader { reader }
    }

    // Read into the whole buffer, returning how many bytes were available
    fn read_full(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..])? {
                0 => break,
                n => filled += n,
            }
        }
        Ok(filled)
    }

    fn read_checked(&mut self, expected: &[u8], what: &str) -> io::Result<()> {
        let mut crc_buf = [0u8; 4];
        if self.read_full(&mut crc_buf)? < crc_buf.len() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("record file truncated in {what} checksum"),
            ));
        }
        if u32::from_le_bytes(crc_buf) != masked_crc32c(expected) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("record {what} checksum mismatch"),
            ));
        }
        Ok(())
    }

    fn read_record(&mut self) -> io::Result<Option<Example>> {
        let mut length_buf = [0u8; 8];
        match self.read_full(&mut length_buf)? {
            0 => return Ok(None),
            n if n < length_buf.len() => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "record file truncated in length header",
                ));
            }
            _ => {}
        }
        self.read_checked(&length_buf, "length")?;

        let length = u64::from_le_bytes(length_buf) as usize;
        let mut payload = vec![0u8; length];
        if self.read_full(&mut payload)? < length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "record file truncated in payload",
            ));
        }
        self.read_checked(&payload, "payload")?;

        let example = Example::decode(payload.as_slice())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Some(example))
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = io::Result<Example>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}
