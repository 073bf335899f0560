use four_cc::FourCC;

use crate::read_box_children;
use crate::{BoxHeader, ByteCursor, Mp4Box, Mp4BoxError};

use super::{MovieExtendsHeaderBox, TrackExtendsBox};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieExtendsBox {
    pub mehd: Option<MovieExtendsHeaderBox>,
    /// One per track.
    pub trex: Vec<TrackExtendsBox>,
}

impl Mp4Box for MovieExtendsBox {
    const NAME: FourCC = FourCC(*b"mvex");

    fn content_size(&self) -> u64 {
        let mut size = 0;

        if let Some(mehd) = &self.mehd {
            size += mehd.size();
        }

        for trex in &self.trex {
            size += trex.size();
        }

        size
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        if let Some(mehd) = &self.mehd {
            mehd.write(cursor)?;
        }

        for trex in &self.trex {
            trex.write(cursor)?;
        }

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let mut mehd = None;
        let mut trex = Vec::new();

        read_box_children(cursor, header, |child, cursor| {
            match &child.name.0 {
                b"mehd" => mehd = Some(MovieExtendsHeaderBox::read_box_contents(cursor, child)?),
                b"trex" => trex.push(TrackExtendsBox::read_box_contents(cursor, child)?),
                _ => return Ok(false),
            }

            Ok(true)
        })?;

        Ok(MovieExtendsBox { mehd, trex })
    }
}
