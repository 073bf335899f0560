use byteorder::{BigEndian, ByteOrder};
use bytes::{Bytes, BytesMut};
use four_cc::FourCC;

use crate::Mp4BoxError;

/// Sequential big-endian reader/writer over an in-memory buffer.
///
/// One cursor backs a single encode or decode call. Writing past the end
/// grows the buffer; writing behind the end overwrites in place, so a box
/// can seek back and patch bytes it wrote earlier.
pub struct ByteCursor {
    data: BytesMut,
    position: usize,
}

impl ByteCursor {
    pub fn new() -> Self {
        ByteCursor {
            data: BytesMut::new(),
            position: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ByteCursor {
            data: BytesMut::with_capacity(capacity),
            position: 0,
        }
    }

    pub fn from_slice(data: &[u8]) -> Self {
        let mut buffer = BytesMut::with_capacity(data.len());
        buffer.extend_from_slice(data);

        ByteCursor {
            data: buffer,
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn set_position(&mut self, position: usize) -> Result<&mut Self, Mp4BoxError> {
        if position > self.data.len() {
            return Err(Mp4BoxError::PositionOutOfRange {
                position,
                len: self.data.len(),
            });
        }

        self.position = position;

        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Bytes {
        self.data.freeze()
    }

    fn put(&mut self, src: &[u8]) -> &mut Self {
        let end = self.position + src.len();

        if end <= self.data.len() {
            self.data[self.position..end].copy_from_slice(src);
        } else {
            let in_place = self.data.len() - self.position;
            self.data[self.position..].copy_from_slice(&src[..in_place]);
            self.data.extend_from_slice(&src[in_place..]);
        }

        self.position = end;

        self
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.put(&[value])
    }

    pub fn write_u16(&mut self, value: u16) -> &mut Self {
        let mut buf = [0u8; 2];
        BigEndian::write_u16(&mut buf, value);
        self.put(&buf)
    }

    /// Writes the low 24 bits of `value` as 3 bytes, dropping the top byte.
    pub fn write_u24(&mut self, value: u32) -> &mut Self {
        let mut buf = [0u8; 3];
        BigEndian::write_u24(&mut buf, value & 0x00ff_ffff);
        self.put(&buf)
    }

    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        let mut buf = [0u8; 4];
        BigEndian::write_u32(&mut buf, value);
        self.put(&buf)
    }

    pub fn write_u64(&mut self, value: u64) -> &mut Self {
        let mut buf = [0u8; 8];
        BigEndian::write_u64(&mut buf, value);
        self.put(&buf)
    }

    pub fn write_i16(&mut self, value: i16) -> &mut Self {
        let mut buf = [0u8; 2];
        BigEndian::write_i16(&mut buf, value);
        self.put(&buf)
    }

    pub fn write_i32(&mut self, value: i32) -> &mut Self {
        let mut buf = [0u8; 4];
        BigEndian::write_i32(&mut buf, value);
        self.put(&buf)
    }

    pub fn write_bytes(&mut self, value: &[u8]) -> &mut Self {
        self.put(value)
    }

    pub fn write_utf8_bytes(&mut self, value: &str) -> &mut Self {
        self.put(value.as_bytes())
    }

    pub fn write_fourcc(&mut self, value: FourCC) -> &mut Self {
        self.put(&value.0)
    }

    fn ensure(&self, needed: usize) -> Result<(), Mp4BoxError> {
        let available = self.remaining();

        if available < needed {
            return Err(Mp4BoxError::UnexpectedEof { needed, available });
        }

        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, Mp4BoxError> {
        self.ensure(1)?;
        let value = self.data[self.position];
        self.position += 1;
        Ok(value)
    }

    pub fn read_u16(&mut self) -> Result<u16, Mp4BoxError> {
        self.ensure(2)?;
        let value = BigEndian::read_u16(&self.data[self.position..]);
        self.position += 2;
        Ok(value)
    }

    pub fn read_u24(&mut self) -> Result<u32, Mp4BoxError> {
        self.ensure(3)?;
        let value = BigEndian::read_u24(&self.data[self.position..]);
        self.position += 3;
        Ok(value)
    }

    pub fn read_u32(&mut self) -> Result<u32, Mp4BoxError> {
        self.ensure(4)?;
        let value = BigEndian::read_u32(&self.data[self.position..]);
        self.position += 4;
        Ok(value)
    }

    pub fn read_u64(&mut self) -> Result<u64, Mp4BoxError> {
        self.ensure(8)?;
        let value = BigEndian::read_u64(&self.data[self.position..]);
        self.position += 8;
        Ok(value)
    }

    pub fn read_i16(&mut self) -> Result<i16, Mp4BoxError> {
        self.ensure(2)?;
        let value = BigEndian::read_i16(&self.data[self.position..]);
        self.position += 2;
        Ok(value)
    }

    pub fn read_i32(&mut self) -> Result<i32, Mp4BoxError> {
        self.ensure(4)?;
        let value = BigEndian::read_i32(&self.data[self.position..]);
        self.position += 4;
        Ok(value)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<Bytes, Mp4BoxError> {
        self.ensure(count)?;
        let value = Bytes::copy_from_slice(&self.data[self.position..self.position + count]);
        self.position += count;
        Ok(value)
    }

    pub fn read_utf8_bytes(&mut self, count: usize) -> Result<String, Mp4BoxError> {
        let bytes = self.read_bytes(count)?;

        String::from_utf8(bytes.to_vec()).map_err(|_| Mp4BoxError::InvalidUtf8)
    }

    pub fn read_fourcc(&mut self) -> Result<FourCC, Mp4BoxError> {
        self.ensure(4)?;
        let mut value = [0u8; 4];
        value.copy_from_slice(&self.data[self.position..self.position + 4]);
        self.position += 4;
        Ok(FourCC(value))
    }

    pub fn skip(&mut self, count: usize) -> Result<&mut Self, Mp4BoxError> {
        self.ensure(count)?;
        self.position += count;
        Ok(self)
    }
}

impl Default for ByteCursor {
    fn default() -> Self {
        ByteCursor::new()
    }
}

#[test]
fn primitives_round_trip() {
    let mut cursor = ByteCursor::new();
    cursor
        .write_u8(0xab)
        .write_u16(0x1234)
        .write_u24(0x00aabbcc)
        .write_u32(0xdeadbeef)
        .write_u64(0x0102030405060708)
        .write_i16(-2)
        .write_i32(-70000);

    cursor.set_position(0).unwrap();

    assert_eq!(cursor.read_u8().unwrap(), 0xab);
    assert_eq!(cursor.read_u16().unwrap(), 0x1234);
    assert_eq!(cursor.read_u24().unwrap(), 0x00aabbcc);
    assert_eq!(cursor.read_u32().unwrap(), 0xdeadbeef);
    assert_eq!(cursor.read_u64().unwrap(), 0x0102030405060708);
    assert_eq!(cursor.read_i16().unwrap(), -2);
    assert_eq!(cursor.read_i32().unwrap(), -70000);
    assert_eq!(cursor.remaining(), 0);
}

#[test]
fn write_u24_drops_the_top_byte() {
    let mut cursor = ByteCursor::new();
    cursor.write_u24(0x01000000);

    assert_eq!(cursor.as_slice(), &[0, 0, 0]);

    cursor.write_u24(0xff123456);

    assert_eq!(&cursor.as_slice()[3..], &[0x12, 0x34, 0x56]);
}

#[test]
fn seeking_back_overwrites_in_place() {
    let mut cursor = ByteCursor::new();
    cursor.write_u32(0).write_utf8_bytes("vmhd");

    cursor.set_position(0).unwrap();
    cursor.write_u32(8);

    assert_eq!(cursor.as_slice(), &[0, 0, 0, 8, b'v', b'm', b'h', b'd']);
    assert_eq!(cursor.len(), 8);
}

#[test]
fn short_reads_fail_with_a_truncation_error() {
    let mut cursor = ByteCursor::from_slice(&[1, 2]);

    assert!(matches!(
        cursor.read_u32(),
        Err(Mp4BoxError::UnexpectedEof {
            needed: 4,
            available: 2,
        })
    ));

    // the failed read must not have consumed anything
    assert_eq!(cursor.read_u16().unwrap(), 0x0102);
}

#[test]
fn seeking_past_the_end_is_rejected() {
    let mut cursor = ByteCursor::from_slice(&[0; 4]);

    assert!(matches!(
        cursor.set_position(5),
        Err(Mp4BoxError::PositionOutOfRange { position: 5, len: 4 })
    ));
}

#[test]
fn utf8_reads_validate() {
    let mut cursor = ByteCursor::from_slice(&[0xff, 0xfe]);

    assert!(matches!(
        cursor.read_utf8_bytes(2),
        Err(Mp4BoxError::InvalidUtf8)
    ));
}
