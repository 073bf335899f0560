use bytes::Bytes;
use four_cc::FourCC;

use crate::FullBoxHeader;
use crate::Mp4Box;
use crate::{BoxHeader, ByteCursor, Mp4BoxError};

use std::mem::size_of;

/// One sample entry, carried as raw bytes.
///
/// Codec configuration payloads (avcC, esds, ...) belong to the encoders
/// feeding this crate, so entries pass through opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleEntry {
    pub name: FourCC,
    pub data: Bytes,
}

impl SampleEntry {
    fn size(&self) -> u64 {
        8 + self.data.len() as u64
    }

    fn write(&self, cursor: &mut ByteCursor) {
        cursor
            .write_u32(self.size() as u32)
            .write_fourcc(self.name)
            .write_bytes(&self.data);
    }

    fn read(cursor: &mut ByteCursor) -> Result<Self, Mp4BoxError> {
        let header = BoxHeader::read(cursor)?;
        let data = cursor.read_bytes(header.content_len() as usize)?;

        Ok(SampleEntry {
            name: header.name,
            data,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleDescriptionBox {
    pub entries: Vec<SampleEntry>,
}

impl Mp4Box for SampleDescriptionBox {
    const NAME: FourCC = FourCC(*b"stsd");

    fn get_full_box_header(&self) -> Option<FullBoxHeader> {
        Some(FullBoxHeader::new(0, 0))
    }

    fn content_size(&self) -> u64 {
        let mut size = size_of::<u32>() as u64;

        for entry in &self.entries {
            size += entry.size();
        }

        size
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        cursor.write_u32(self.entries.len() as _);

        for entry in &self.entries {
            entry.write(cursor);
        }

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, _header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let _ = FullBoxHeader::read(cursor)?;

        let entry_count = cursor.read_u32()?;
        let mut entries = Vec::new();

        for _ in 0..entry_count {
            entries.push(SampleEntry::read(cursor)?);
        }

        Ok(SampleDescriptionBox { entries })
    }
}

#[test]
fn round_trips_opaque_entries() {
    let stsd = SampleDescriptionBox {
        entries: vec![SampleEntry {
            name: FourCC(*b"avc1"),
            data: Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]),
        }],
    };

    let bytes = stsd.to_bytes().unwrap();

    assert_eq!(bytes.len() as u64, stsd.size());
    assert_eq!(SampleDescriptionBox::from_bytes(&bytes).unwrap(), stsd);
}
