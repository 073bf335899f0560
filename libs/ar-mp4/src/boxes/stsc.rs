use four_cc::FourCC;

use crate::Mp4BoxError;
use crate::{BoxHeader, ByteCursor, FullBoxHeader, Mp4Box};

use std::mem::size_of;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleToChunkEntry {
    pub first_chunk: u32,
    pub samples_per_chunk: u32,
    pub sample_description_index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleToChunkBox {
    pub entries: Vec<SampleToChunkEntry>,
}

impl Mp4Box for SampleToChunkBox {
    const NAME: FourCC = FourCC(*b"stsc");

    fn get_full_box_header(&self) -> Option<FullBoxHeader> {
        Some(FullBoxHeader::new(0, 0))
    }

    fn content_size(&self) -> u64 {
        size_of::<u32>() as u64 + (size_of::<u32>() as u64 * 3) * self.entries.len() as u64
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        cursor.write_u32(self.entries.len() as u32);

        for entry in &self.entries {
            cursor
                .write_u32(entry.first_chunk)
                .write_u32(entry.samples_per_chunk)
                .write_u32(entry.sample_description_index);
        }

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, _header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let _ = FullBoxHeader::read(cursor)?;

        let entry_count = cursor.read_u32()?;
        let mut entries = Vec::new();

        for _ in 0..entry_count {
            entries.push(SampleToChunkEntry {
                first_chunk: cursor.read_u32()?,
                samples_per_chunk: cursor.read_u32()?,
                sample_description_index: cursor.read_u32()?,
            });
        }

        Ok(SampleToChunkBox { entries })
    }
}
