use four_cc::FourCC;

use crate::Mp4BoxError;
use crate::{BoxHeader, ByteCursor, FullBoxHeader, Mp4Box};

use std::mem::size_of;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackExtendsBox {
    pub track_id: u32,
    pub default_sample_description_index: u32,
    pub default_sample_duration: u32,
    pub default_sample_size: u32,
    pub default_sample_flags: u32,
}

impl Mp4Box for TrackExtendsBox {
    const NAME: FourCC = FourCC(*b"trex");

    fn get_full_box_header(&self) -> Option<FullBoxHeader> {
        Some(FullBoxHeader::new(0, 0))
    }

    fn content_size(&self) -> u64 {
        size_of::<u32>() as u64 + // track_ID
        size_of::<u32>() as u64 + // default_sample_description_index
        size_of::<u32>() as u64 + // default_sample_duration
        size_of::<u32>() as u64 + // default_sample_size
        size_of::<u32>() as u64 // default_sample_flags
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        cursor
            .write_u32(self.track_id)
            .write_u32(self.default_sample_description_index)
            .write_u32(self.default_sample_duration)
            .write_u32(self.default_sample_size)
            .write_u32(self.default_sample_flags);

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, _header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let _ = FullBoxHeader::read(cursor)?;

        Ok(TrackExtendsBox {
            track_id: cursor.read_u32()?,
            default_sample_description_index: cursor.read_u32()?,
            default_sample_duration: cursor.read_u32()?,
            default_sample_size: cursor.read_u32()?,
            default_sample_flags: cursor.read_u32()?,
        })
    }
}
