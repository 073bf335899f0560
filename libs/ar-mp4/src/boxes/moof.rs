use four_cc::FourCC;

use crate::read_box_children;
use crate::{BoxHeader, ByteCursor, Mp4Box, Mp4BoxError};

use super::{MovieFragmentHeaderBox, TrackFragmentBox};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieFragmentBox {
    pub mfhd: MovieFragmentHeaderBox,
    /// One per track carried in this fragment.
    pub traf: Vec<TrackFragmentBox>,
}

impl Mp4Box for MovieFragmentBox {
    const NAME: FourCC = FourCC(*b"moof");

    fn content_size(&self) -> u64 {
        let mut size = self.mfhd.size();

        for traf in &self.traf {
            size += traf.size();
        }

        size
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        self.mfhd.write(cursor)?;

        for traf in &self.traf {
            traf.write(cursor)?;
        }

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let mut mfhd = None;
        let mut traf = Vec::new();

        read_box_children(cursor, header, |child, cursor| {
            match &child.name.0 {
                b"mfhd" => mfhd = Some(MovieFragmentHeaderBox::read_box_contents(cursor, child)?),
                b"traf" => traf.push(TrackFragmentBox::read_box_contents(cursor, child)?),
                _ => return Ok(false),
            }

            Ok(true)
        })?;

        Ok(MovieFragmentBox {
            mfhd: mfhd.ok_or(Mp4BoxError::MissingBox {
                parent: Self::NAME,
                name: MovieFragmentHeaderBox::NAME,
            })?,
            traf,
        })
    }
}

#[test]
fn round_trips_a_fragment_tree() {
    use crate::*;

    let mut moof = MovieFragmentBox {
        mfhd: MovieFragmentHeaderBox { sequence_number: 4 },
        traf: vec![TrackFragmentBox {
            tfhd: TrackFragmentHeaderBox {
                track_id: 1,
                base_data_offset: None,
                sample_description_index: None,
                default_sample_duration: None,
                default_sample_size: None,
                default_sample_flags: None,
                duration_is_empty: false,
                default_base_is_moof: true,
            },
            track_runs: vec![TrackFragmentRunBox {
                data_offset: Some(0),
                first_sample_flags: None,
                samples: vec![TrackFragmentSample {
                    duration: Some(1800),
                    size: Some(64_000),
                    flags: None,
                    composition_time_offset: None,
                }],
            }],
            base_media_decode_time: Some(TrackFragmentBaseMediaDecodeTimeBox {
                base_media_decode_time: 3600,
            }),
        }],
    };

    // point the run at the contents of the mdat that follows
    moof.traf[0].track_runs[0].data_offset = Some(moof.size() as i32 + 8);

    let bytes = moof.to_bytes().unwrap();

    assert_eq!(bytes.len() as u64, moof.size());
    assert_eq!(MovieFragmentBox::from_bytes(&bytes).unwrap(), moof);
}
