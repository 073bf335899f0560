use four_cc::FourCC;

use crate::read_box_children;
use crate::Mp4Box;
use crate::{BoxHeader, ByteCursor, Mp4BoxError};

use super::{
    ChunkLargeOffsetBox, ChunkOffsetBox, SampleDescriptionBox, SampleSizeBox, SampleToChunkBox,
    TimeToSampleBox,
};

/// 32-bit or 64-bit chunk offset table; fragmented files write the 64-bit
/// form so offsets stay valid past 4 GiB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkOffsets {
    Stco(ChunkOffsetBox),
    Co64(ChunkLargeOffsetBox),
}

impl ChunkOffsets {
    fn size(&self) -> u64 {
        match self {
            ChunkOffsets::Stco(stco) => stco.size(),
            ChunkOffsets::Co64(co64) => co64.size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleTableBox {
    pub stsd: SampleDescriptionBox,
    pub stts: TimeToSampleBox,
    pub stsc: SampleToChunkBox,
    pub stsz: SampleSizeBox,
    pub chunk_offsets: ChunkOffsets,
}

impl Mp4Box for SampleTableBox {
    const NAME: FourCC = FourCC(*b"stbl");

    fn content_size(&self) -> u64 {
        self.stsd.size()
            + self.stts.size()
            + self.stsc.size()
            + self.stsz.size()
            + self.chunk_offsets.size()
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        self.stsd.write(cursor)?;
        self.stts.write(cursor)?;
        self.stsc.write(cursor)?;
        self.stsz.write(cursor)?;

        match &self.chunk_offsets {
            ChunkOffsets::Stco(stco) => stco.write(cursor)?,
            ChunkOffsets::Co64(co64) => co64.write(cursor)?,
        }

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let mut stsd = None;
        let mut stts = None;
        let mut stsc = None;
        let mut stsz = None;
        let mut chunk_offsets = None;

        read_box_children(cursor, header, |child, cursor| {
            match &child.name.0 {
                b"stsd" => stsd = Some(SampleDescriptionBox::read_box_contents(cursor, child)?),
                b"stts" => stts = Some(TimeToSampleBox::read_box_contents(cursor, child)?),
                b"stsc" => stsc = Some(SampleToChunkBox::read_box_contents(cursor, child)?),
                b"stsz" => stsz = Some(SampleSizeBox::read_box_contents(cursor, child)?),
                b"stco" => {
                    chunk_offsets = Some(ChunkOffsets::Stco(ChunkOffsetBox::read_box_contents(
                        cursor, child,
                    )?))
                }
                b"co64" => {
                    chunk_offsets = Some(ChunkOffsets::Co64(
                        ChunkLargeOffsetBox::read_box_contents(cursor, child)?,
                    ))
                }
                _ => return Ok(false),
            }

            Ok(true)
        })?;

        Ok(SampleTableBox {
            stsd: stsd.ok_or(Mp4BoxError::MissingBox {
                parent: Self::NAME,
                name: SampleDescriptionBox::NAME,
            })?,
            stts: stts.ok_or(Mp4BoxError::MissingBox {
                parent: Self::NAME,
                name: TimeToSampleBox::NAME,
            })?,
            stsc: stsc.ok_or(Mp4BoxError::MissingBox {
                parent: Self::NAME,
                name: SampleToChunkBox::NAME,
            })?,
            stsz: stsz.ok_or(Mp4BoxError::MissingBox {
                parent: Self::NAME,
                name: SampleSizeBox::NAME,
            })?,
            chunk_offsets: chunk_offsets.ok_or(Mp4BoxError::MissingBox {
                parent: Self::NAME,
                name: ChunkOffsetBox::NAME,
            })?,
        })
    }
}
