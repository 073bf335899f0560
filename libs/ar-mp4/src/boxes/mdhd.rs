use four_cc::FourCC;

use crate::Mp4BoxError;
use crate::{BoxHeader, ByteCursor, FullBoxHeader, Mp4Box};

use std::mem::size_of;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaHeaderBox {
    pub creation_time: u64,
    pub modification_time: u64,
    pub timescale: u32,
    pub duration: u64,
    /// ISO-639-2/T code packed into 15 bits, 0 when unset.
    pub language: u16,
}

impl Mp4Box for MediaHeaderBox {
    const NAME: FourCC = FourCC(*b"mdhd");

    fn get_full_box_header(&self) -> Option<FullBoxHeader> {
        Some(FullBoxHeader::new(1, 0))
    }

    fn content_size(&self) -> u64 {
        size_of::<u64>() as u64 + // creation_time
        size_of::<u64>() as u64 + // modification_time
        size_of::<u32>() as u64 + // timescale
        size_of::<u64>() as u64 + // duration
        size_of::<u16>() as u64 + // language
        size_of::<u16>() as u64 // pre_defined
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        cursor
            .write_u64(self.creation_time)
            .write_u64(self.modification_time)
            .write_u32(self.timescale)
            .write_u64(self.duration)
            .write_u16(self.language)
            .write_u16(0); // pre_defined

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, _header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let full_box = FullBoxHeader::read(cursor)?;

        let (creation_time, modification_time, timescale, duration) = if full_box.version() == 1 {
            (
                cursor.read_u64()?,
                cursor.read_u64()?,
                cursor.read_u32()?,
                cursor.read_u64()?,
            )
        } else {
            (
                cursor.read_u32()? as u64,
                cursor.read_u32()? as u64,
                cursor.read_u32()?,
                cursor.read_u32()? as u64,
            )
        };

        let language = cursor.read_u16()?;
        cursor.skip(2)?; // pre_defined

        Ok(MediaHeaderBox {
            creation_time,
            modification_time,
            timescale,
            duration,
            language,
        })
    }
}

#[test]
fn round_trips() {
    let mdhd = MediaHeaderBox {
        creation_time: 3_600_000_000,
        modification_time: 3_600_000_001,
        timescale: 90_000,
        duration: 270_000,
        language: 0x55c4, // "und"
    };

    let decoded = MediaHeaderBox::from_bytes(&mdhd.to_bytes().unwrap()).unwrap();

    assert_eq!(decoded, mdhd);
}
