use std::io;

use bytes::Bytes;
pub use four_cc::FourCC;
use tracing::debug;

mod boxes;
mod cursor;
mod registry;

pub use boxes::*;
pub use cursor::ByteCursor;
pub use registry::{decoder_for, read_any_box, read_boxes, AnyBox, BoxDecoder};

fn get_total_box_size<B: Mp4Box + ?Sized>(boks: &B) -> u64 {
    let mut size = boks.content_size() + 8;

    if boks.get_full_box_header().is_some() {
        size += FullBoxHeader::SIZE;
    }

    if size > u32::MAX as u64 {
        size += 8; // largesize header
    }

    size
}

fn write_box_header<B: Mp4Box + ?Sized>(cursor: &mut ByteCursor, size: u64) {
    if size > u32::MAX as u64 {
        cursor.write_u32(1);
        cursor.write_bytes(&B::NAME.0);
        cursor.write_u64(size);
    } else {
        cursor.write_u32(size as u32);
        cursor.write_bytes(&B::NAME.0);
    }
}

/// The common `size` + `type` prefix of every box, as parsed off the wire.
///
/// `offset` records where in the buffer the box started. It is bookkeeping
/// for callers walking a stream and is never written back out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoxHeader {
    pub name: FourCC,
    pub size: u64,
    pub header_len: u64,
    pub offset: u64,
}

impl BoxHeader {
    pub fn content_len(&self) -> u64 {
        self.size - self.header_len
    }

    pub fn read(cursor: &mut ByteCursor) -> Result<Self, Mp4BoxError> {
        let offset = cursor.position() as u64;

        let size = cursor.read_u32()?;
        let name = cursor.read_fourcc()?;

        let (size, header_len) = match size {
            0 => (cursor.len() as u64 - offset, 8),
            1 => (cursor.read_u64()?, 16),
            _ => (size as u64, 8),
        };

        if size < header_len {
            return Err(Mp4BoxError::InvalidSize { name, size });
        }

        // a box that runs past the buffer cannot be decoded or skipped
        let available = header_len as usize + cursor.remaining();
        if size > available as u64 {
            return Err(Mp4BoxError::UnexpectedEof {
                needed: size as usize,
                available,
            });
        }

        Ok(BoxHeader {
            name,
            size,
            header_len,
            offset,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FullBoxHeader {
    version: u8,
    flags: u32,
}

impl FullBoxHeader {
    pub const SIZE: u64 = 4;

    pub fn new(version: u8, flags: u32) -> Self {
        FullBoxHeader { version, flags }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn flags(&self) -> u32 {
        self.flags
    }

    pub fn write(&self, cursor: &mut ByteCursor) {
        cursor.write_u8(self.version).write_u24(self.flags);
    }

    pub fn read(cursor: &mut ByteCursor) -> Result<Self, Mp4BoxError> {
        let version = cursor.read_u8()?;
        let flags = cursor.read_u24()?;

        Ok(FullBoxHeader { version, flags })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Mp4BoxError {
    #[error("Failed to write box: {0}")]
    IoError(#[from] io::Error),

    #[error("unexpected end of input: needed {needed} bytes, {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    #[error("'{name}' declares {declared} bytes but decoding consumed {actual}")]
    SizeMismatch {
        name: FourCC,
        declared: u64,
        actual: u64,
    },

    #[error("expected a '{expected}' box, found '{found}'")]
    UnexpectedBox { expected: FourCC, found: FourCC },

    #[error("no decoder registered for '{0}' boxes")]
    UnsupportedBox(FourCC),

    #[error("'{parent}' is missing its mandatory '{name}' child")]
    MissingBox { parent: FourCC, name: FourCC },

    #[error("'{name}' declares an impossible size of {size} bytes")]
    InvalidSize { name: FourCC, size: u64 },

    #[error("cursor position {position} is past the end of the {len}-byte buffer")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("string field holds invalid UTF-8")]
    InvalidUtf8,
}

/// A trait interface for a MP4 box.
///
/// Encoding and decoding are symmetric: `write_box_contents` and
/// `read_box_contents` cover the variant payload (including the version and
/// flags prefix for full boxes, on the read side), while the provided
/// `write`/`read` handle the `size` + `type` header and verify that the
/// declared size matches the bytes actually produced or consumed.
pub trait Mp4Box {
    const NAME: FourCC;

    fn get_full_box_header(&self) -> Option<FullBoxHeader> {
        None
    }

    fn flags(&self) -> Option<u32> {
        self.get_full_box_header().map(|h| h.flags)
    }

    /// The size of the contents of the box.
    fn content_size(&self) -> u64;

    fn size(&self) -> u64 {
        get_total_box_size::<Self>(&self)
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError>;

    fn write(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        let start = cursor.position();

        write_box_header::<Self>(cursor, self.size());
        if let Some(box_header) = self.get_full_box_header() {
            box_header.write(cursor);
        }

        self.write_box_contents(cursor)?;

        let written = (cursor.position() - start) as u64;
        assert_eq!(written, self.size());

        Ok(())
    }

    fn to_bytes(&self) -> Result<Bytes, Mp4BoxError> {
        let mut cursor = ByteCursor::with_capacity(self.size() as usize);
        self.write(&mut cursor)?;

        Ok(cursor.into_bytes())
    }

    fn read_box_contents(cursor: &mut ByteCursor, header: &BoxHeader) -> Result<Self, Mp4BoxError>
    where
        Self: Sized;

    fn read(cursor: &mut ByteCursor) -> Result<Self, Mp4BoxError>
    where
        Self: Sized,
    {
        let start = cursor.position();

        let header = BoxHeader::read(cursor)?;
        if header.name != Self::NAME {
            return Err(Mp4BoxError::UnexpectedBox {
                expected: Self::NAME,
                found: header.name,
            });
        }

        let value = Self::read_box_contents(cursor, &header)?;

        let consumed = (cursor.position() - start) as u64;
        if consumed != header.size {
            return Err(Mp4BoxError::SizeMismatch {
                name: header.name,
                declared: header.size,
                actual: consumed,
            });
        }

        Ok(value)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Mp4BoxError>
    where
        Self: Sized,
    {
        let mut cursor = ByteCursor::from_slice(bytes);
        Self::read(&mut cursor)
    }
}

/// Walks the children of a container box.
///
/// The handler decodes the children it recognizes and returns `false` for
/// the rest, which are skipped by their declared size so one odd child does
/// not take down its siblings. A child that lies about its size, either by
/// overflowing the parent or by not matching what its decoder consumed, is
/// a malformed-box error.
pub fn read_box_children<F>(
    cursor: &mut ByteCursor,
    header: &BoxHeader,
    mut handle: F,
) -> Result<(), Mp4BoxError>
where
    F: FnMut(&BoxHeader, &mut ByteCursor) -> Result<bool, Mp4BoxError>,
{
    let end = cursor.position() + header.content_len() as usize;

    while cursor.position() < end {
        let start = cursor.position();
        let child = BoxHeader::read(cursor)?;

        if start + child.size as usize > end {
            return Err(Mp4BoxError::InvalidSize {
                name: child.name,
                size: child.size,
            });
        }

        if handle(&child, cursor)? {
            let consumed = (cursor.position() - start) as u64;
            if consumed != child.size {
                return Err(Mp4BoxError::SizeMismatch {
                    name: child.name,
                    declared: child.size,
                    actual: consumed,
                });
            }
        } else {
            debug!("skipping unrecognized '{}' box ({} bytes)", child.name, child.size);
            cursor.set_position(start + child.size as usize)?;
        }
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaDataBox {
    pub data: Bytes,
}

impl Mp4Box for MediaDataBox {
    const NAME: FourCC = FourCC(*b"mdat");

    fn content_size(&self) -> u64 {
        self.data.len() as _
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        cursor.write_bytes(&self.data);

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let data = cursor.read_bytes(header.content_len() as usize)?;

        Ok(MediaDataBox { data })
    }
}

#[test]
fn box_header_reads_the_largesize_escape() {
    let mut cursor = ByteCursor::new();
    cursor
        .write_u32(1)
        .write_utf8_bytes("mdat")
        .write_u64(24)
        .write_u64(0xfeedfacecafebeef);

    cursor.set_position(0).unwrap();
    let header = BoxHeader::read(&mut cursor).unwrap();

    assert_eq!(header.name, FourCC(*b"mdat"));
    assert_eq!(header.size, 24);
    assert_eq!(header.header_len, 16);
    assert_eq!(header.content_len(), 8);
}

#[test]
fn box_header_rejects_a_size_past_the_buffer() {
    let mut cursor = ByteCursor::new();
    cursor.write_u32(64).write_utf8_bytes("moov");

    cursor.set_position(0).unwrap();

    assert!(matches!(
        BoxHeader::read(&mut cursor),
        Err(Mp4BoxError::UnexpectedEof {
            needed: 64,
            available: 8,
        })
    ));
}

#[test]
fn box_header_rejects_sizes_smaller_than_itself() {
    let mut cursor = ByteCursor::new();
    cursor.write_u32(7).write_utf8_bytes("free");

    cursor.set_position(0).unwrap();

    assert!(matches!(
        BoxHeader::read(&mut cursor),
        Err(Mp4BoxError::InvalidSize { size: 7, .. })
    ));
}

#[test]
fn box_header_size_zero_extends_to_the_end() {
    let mut cursor = ByteCursor::new();
    cursor
        .write_u32(0)
        .write_utf8_bytes("mdat")
        .write_bytes(&[1, 2, 3, 4]);

    cursor.set_position(0).unwrap();
    let header = BoxHeader::read(&mut cursor).unwrap();

    assert_eq!(header.size, 12);
    assert_eq!(header.content_len(), 4);
}

#[test]
fn mdat_round_trips() {
    let mdat = MediaDataBox {
        data: Bytes::from_static(&[9, 8, 7, 6, 5]),
    };

    let bytes = mdat.to_bytes().unwrap();
    assert_eq!(bytes.len() as u64, mdat.size());
    assert_eq!(&bytes[..8], &[0, 0, 0, 13, b'm', b'd', b'a', b't']);

    let decoded = MediaDataBox::from_bytes(&bytes).unwrap();
    assert_eq!(decoded.data, mdat.data);
}

#[test]
fn full_box_header_masks_flags_to_24_bits() {
    let mut cursor = ByteCursor::new();
    FullBoxHeader::new(0, 0x01000000).write(&mut cursor);

    assert_eq!(cursor.as_slice(), &[0, 0, 0, 0]);
}
