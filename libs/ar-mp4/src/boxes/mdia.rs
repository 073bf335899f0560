use four_cc::FourCC;

use crate::read_box_children;
use crate::Mp4Box;
use crate::{BoxHeader, ByteCursor, Mp4BoxError};

use super::{HandlerBox, MediaHeaderBox, MediaInformationBox};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBox {
    pub mdhd: MediaHeaderBox,
    pub hdlr: HandlerBox,
    pub minf: MediaInformationBox,
}

impl Mp4Box for MediaBox {
    const NAME: FourCC = FourCC(*b"mdia");

    fn content_size(&self) -> u64 {
        self.mdhd.size() + self.hdlr.size() + self.minf.size()
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        self.mdhd.write(cursor)?;
        self.hdlr.write(cursor)?;
        self.minf.write(cursor)?;

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let mut mdhd = None;
        let mut hdlr = None;
        let mut minf = None;

        read_box_children(cursor, header, |child, cursor| {
            match &child.name.0 {
                b"mdhd" => mdhd = Some(MediaHeaderBox::read_box_contents(cursor, child)?),
                b"hdlr" => hdlr = Some(HandlerBox::read_box_contents(cursor, child)?),
                b"minf" => minf = Some(MediaInformationBox::read_box_contents(cursor, child)?),
                _ => return Ok(false),
            }

            Ok(true)
        })?;

        Ok(MediaBox {
            mdhd: mdhd.ok_or(Mp4BoxError::MissingBox {
                parent: Self::NAME,
                name: MediaHeaderBox::NAME,
            })?,
            hdlr: hdlr.ok_or(Mp4BoxError::MissingBox {
                parent: Self::NAME,
                name: HandlerBox::NAME,
            })?,
            minf: minf.ok_or(Mp4BoxError::MissingBox {
                parent: Self::NAME,
                name: MediaInformationBox::NAME,
            })?,
        })
    }
}
