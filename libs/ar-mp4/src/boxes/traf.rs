use four_cc::FourCC;

use crate::read_box_children;
use crate::{BoxHeader, ByteCursor, Mp4Box, Mp4BoxError};

use super::{TrackFragmentBaseMediaDecodeTimeBox, TrackFragmentHeaderBox, TrackFragmentRunBox};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackFragmentBox {
    pub tfhd: TrackFragmentHeaderBox,
    pub track_runs: Vec<TrackFragmentRunBox>,
    pub base_media_decode_time: Option<TrackFragmentBaseMediaDecodeTimeBox>,
}

impl Mp4Box for TrackFragmentBox {
    const NAME: FourCC = FourCC(*b"traf");

    fn content_size(&self) -> u64 {
        let mut size = self.tfhd.size();

        for trun in &self.track_runs {
            size += trun.size();
        }

        if let Some(base_media_decode_time) = &self.base_media_decode_time {
            size += base_media_decode_time.size();
        }

        size
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        self.tfhd.write(cursor)?;

        if let Some(base_media_decode_time) = &self.base_media_decode_time {
            base_media_decode_time.write(cursor)?;
        }

        for run in &self.track_runs {
            run.write(cursor)?;
        }

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let mut tfhd = None;
        let mut track_runs = Vec::new();
        let mut base_media_decode_time = None;

        read_box_children(cursor, header, |child, cursor| {
            match &child.name.0 {
                b"tfhd" => {
                    tfhd = Some(TrackFragmentHeaderBox::read_box_contents(cursor, child)?)
                }
                b"trun" => track_runs.push(TrackFragmentRunBox::read_box_contents(cursor, child)?),
                b"tfdt" => {
                    base_media_decode_time = Some(
                        TrackFragmentBaseMediaDecodeTimeBox::read_box_contents(cursor, child)?,
                    )
                }
                _ => return Ok(false),
            }

            Ok(true)
        })?;

        Ok(TrackFragmentBox {
            tfhd: tfhd.ok_or(Mp4BoxError::MissingBox {
                parent: Self::NAME,
                name: TrackFragmentHeaderBox::NAME,
            })?,
            track_runs,
            base_media_decode_time,
        })
    }
}
