use four_cc::FourCC;

use crate::read_box_children;
use crate::Mp4Box;
use crate::{BoxHeader, ByteCursor, Mp4BoxError};

use super::{MediaBox, TrackHeaderBox};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackBox {
    pub tkhd: TrackHeaderBox,
    pub mdia: MediaBox,
}

impl Mp4Box for TrackBox {
    const NAME: FourCC = FourCC(*b"trak");

    fn content_size(&self) -> u64 {
        self.tkhd.size() + self.mdia.size()
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        self.tkhd.write(cursor)?;
        self.mdia.write(cursor)?;

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let mut tkhd = None;
        let mut mdia = None;

        read_box_children(cursor, header, |child, cursor| {
            match &child.name.0 {
                b"tkhd" => tkhd = Some(TrackHeaderBox::read_box_contents(cursor, child)?),
                b"mdia" => mdia = Some(MediaBox::read_box_contents(cursor, child)?),
                _ => return Ok(false),
            }

            Ok(true)
        })?;

        Ok(TrackBox {
            tkhd: tkhd.ok_or(Mp4BoxError::MissingBox {
                parent: Self::NAME,
                name: TrackHeaderBox::NAME,
            })?,
            mdia: mdia.ok_or(Mp4BoxError::MissingBox {
                parent: Self::NAME,
                name: MediaBox::NAME,
            })?,
        })
    }
}
