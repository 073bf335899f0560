use four_cc::FourCC;

use crate::read_box_children;
use crate::Mp4Box;
use crate::{BoxHeader, ByteCursor, Mp4BoxError};

use super::{DataInformationBox, SampleTableBox, SoundMediaHeaderBox, VideoMediaHeaderBox};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaHeader {
    Video(VideoMediaHeaderBox),
    Sound(SoundMediaHeaderBox),
}

impl MediaHeader {
    fn size(&self) -> u64 {
        match self {
            MediaHeader::Video(vmhd) => vmhd.size(),
            MediaHeader::Sound(smhd) => smhd.size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaInformationBox {
    pub media_header: MediaHeader,
    pub dinf: DataInformationBox,
    pub stbl: SampleTableBox,
}

impl Mp4Box for MediaInformationBox {
    const NAME: FourCC = FourCC(*b"minf");

    fn content_size(&self) -> u64 {
        self.media_header.size() + self.dinf.size() + self.stbl.size()
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        match &self.media_header {
            MediaHeader::Video(vmhd) => vmhd.write(cursor)?,
            MediaHeader::Sound(smhd) => smhd.write(cursor)?,
        }

        self.dinf.write(cursor)?;
        self.stbl.write(cursor)?;

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let mut media_header = None;
        let mut dinf = None;
        let mut stbl = None;

        read_box_children(cursor, header, |child, cursor| {
            match &child.name.0 {
                b"vmhd" => {
                    media_header = Some(MediaHeader::Video(VideoMediaHeaderBox::read_box_contents(
                        cursor, child,
                    )?))
                }
                b"smhd" => {
                    media_header = Some(MediaHeader::Sound(SoundMediaHeaderBox::read_box_contents(
                        cursor, child,
                    )?))
                }
                b"dinf" => dinf = Some(DataInformationBox::read_box_contents(cursor, child)?),
                b"stbl" => stbl = Some(SampleTableBox::read_box_contents(cursor, child)?),
                _ => return Ok(false),
            }

            Ok(true)
        })?;

        Ok(MediaInformationBox {
            media_header: media_header.ok_or(Mp4BoxError::MissingBox {
                parent: Self::NAME,
                name: VideoMediaHeaderBox::NAME,
            })?,
            dinf: dinf.ok_or(Mp4BoxError::MissingBox {
                parent: Self::NAME,
                name: DataInformationBox::NAME,
            })?,
            stbl: stbl.ok_or(Mp4BoxError::MissingBox {
                parent: Self::NAME,
                name: SampleTableBox::NAME,
            })?,
        })
    }
}
