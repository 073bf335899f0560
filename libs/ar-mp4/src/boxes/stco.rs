use four_cc::FourCC;

use crate::Mp4BoxError;
use crate::{BoxHeader, ByteCursor, FullBoxHeader, Mp4Box};

use std::mem::size_of;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkOffsetBox {
    pub chunk_offsets: Vec<u32>,
}

impl Mp4Box for ChunkOffsetBox {
    const NAME: FourCC = FourCC(*b"stco");

    fn get_full_box_header(&self) -> Option<FullBoxHeader> {
        Some(FullBoxHeader::new(0, 0))
    }

    fn content_size(&self) -> u64 {
        size_of::<u32>() as u64 + (size_of::<u32>() as u64) * self.chunk_offsets.len() as u64
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        cursor.write_u32(self.chunk_offsets.len() as u32);

        for &chunk_offset in &self.chunk_offsets {
            cursor.write_u32(chunk_offset);
        }

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, _header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let _ = FullBoxHeader::read(cursor)?;

        let entry_count = cursor.read_u32()?;
        let mut chunk_offsets = Vec::new();

        for _ in 0..entry_count {
            chunk_offsets.push(cursor.read_u32()?);
        }

        Ok(ChunkOffsetBox { chunk_offsets })
    }
}
