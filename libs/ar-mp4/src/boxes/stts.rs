use four_cc::FourCC;

use crate::Mp4BoxError;
use crate::{BoxHeader, ByteCursor, FullBoxHeader, Mp4Box};

use std::mem::size_of;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeToSampleEntry {
    pub count: u32,
    pub delta: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeToSampleBox {
    pub entries: Vec<TimeToSampleEntry>,
}

impl Mp4Box for TimeToSampleBox {
    const NAME: FourCC = FourCC(*b"stts");

    fn get_full_box_header(&self) -> Option<FullBoxHeader> {
        Some(FullBoxHeader::new(0, 0))
    }

    fn content_size(&self) -> u64 {
        size_of::<u32>() as u64
            + (size_of::<u32>() as u64 + size_of::<u32>() as u64) * self.entries.len() as u64
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        cursor.write_u32(self.entries.len() as _);

        for entry in &self.entries {
            cursor.write_u32(entry.count).write_u32(entry.delta);
        }

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, _header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let _ = FullBoxHeader::read(cursor)?;

        let entry_count = cursor.read_u32()?;
        let mut entries = Vec::new();

        for _ in 0..entry_count {
            entries.push(TimeToSampleEntry {
                count: cursor.read_u32()?,
                delta: cursor.read_u32()?,
            });
        }

        Ok(TimeToSampleBox { entries })
    }
}
