use four_cc::FourCC;

use crate::read_box_children;
use crate::Mp4Box;
use crate::{BoxHeader, ByteCursor, Mp4BoxError};

use super::{MovieExtendsBox, MovieHeaderBox, TrackBox};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieBox {
    pub mvhd: MovieHeaderBox,
    pub mvex: Option<MovieExtendsBox>,
    pub tracks: Vec<TrackBox>,
}

impl Mp4Box for MovieBox {
    const NAME: FourCC = FourCC(*b"moov");

    fn content_size(&self) -> u64 {
        let mut size = self.mvhd.size();

        if let Some(mvex) = &self.mvex {
            size += mvex.size();
        }

        for track in &self.tracks {
            size += track.size();
        }

        size
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        self.mvhd.write(cursor)?;

        if let Some(mvex) = &self.mvex {
            mvex.write(cursor)?;
        }

        for track in &self.tracks {
            track.write(cursor)?;
        }

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let mut mvhd = None;
        let mut mvex = None;
        let mut tracks = Vec::new();

        read_box_children(cursor, header, |child, cursor| {
            match &child.name.0 {
                b"mvhd" => mvhd = Some(MovieHeaderBox::read_box_contents(cursor, child)?),
                b"mvex" => mvex = Some(MovieExtendsBox::read_box_contents(cursor, child)?),
                b"trak" => tracks.push(TrackBox::read_box_contents(cursor, child)?),
                _ => return Ok(false),
            }

            Ok(true)
        })?;

        Ok(MovieBox {
            mvhd: mvhd.ok_or(Mp4BoxError::MissingBox {
                parent: Self::NAME,
                name: MovieHeaderBox::NAME,
            })?,
            mvex,
            tracks,
        })
    }
}

#[cfg(test)]
fn fragmented_movie() -> MovieBox {
    use crate::*;

    MovieBox {
        mvhd: MovieHeaderBox {
            creation_time: 0,
            modification_time: 0,
            timescale: 90_000,
            duration: 0,
            next_track_id: 2,
        },
        mvex: Some(MovieExtendsBox {
            mehd: Some(MovieExtendsHeaderBox {
                fragment_duration: 0,
            }),
            trex: vec![TrackExtendsBox {
                track_id: 1,
                default_sample_description_index: 1,
                default_sample_duration: 0,
                default_sample_size: 0,
                default_sample_flags: 0,
            }],
        }),
        tracks: vec![TrackBox {
            tkhd: TrackHeaderBox {
                flags: TrackHeaderFlags::ENABLED | TrackHeaderFlags::IN_MOVIE,
                creation_time: 0,
                modification_time: 0,
                track_id: 1,
                duration: 0,
                width: 1920,
                height: 1080,
            },
            mdia: MediaBox {
                mdhd: MediaHeaderBox {
                    creation_time: 0,
                    modification_time: 0,
                    timescale: 90_000,
                    duration: 0,
                    language: 0x55c4,
                },
                hdlr: HandlerBox {
                    handler_type: FourCC(*b"vide"),
                    name: String::from("Video Handler"),
                },
                minf: MediaInformationBox {
                    media_header: MediaHeader::Video(VideoMediaHeaderBox::new()),
                    dinf: DataInformationBox {
                        dref: DataReferenceBox {
                            entries: vec![DataEntryUrlBox {
                                location: String::new(),
                            }],
                        },
                    },
                    stbl: SampleTableBox {
                        stsd: SampleDescriptionBox {
                            entries: vec![SampleEntry {
                                name: FourCC(*b"avc1"),
                                data: bytes::Bytes::from_static(&[0; 16]),
                            }],
                        },
                        stts: TimeToSampleBox {
                            entries: Vec::new(),
                        },
                        stsc: SampleToChunkBox {
                            entries: Vec::new(),
                        },
                        stsz: SampleSizeBox {
                            sample_sizes: SampleSizes::Variable(Vec::new()),
                        },
                        chunk_offsets: ChunkOffsets::Co64(ChunkLargeOffsetBox {
                            chunk_offsets: Vec::new(),
                        }),
                    },
                },
            },
        }],
    }
}

#[test]
fn round_trips_a_whole_movie_tree() {
    use crate::Mp4Box;

    let moov = fragmented_movie();
    let bytes = moov.to_bytes().unwrap();

    assert_eq!(bytes.len() as u64, moov.size());
    assert_eq!(&bytes[4..8], b"moov");
    assert_eq!(MovieBox::from_bytes(&bytes).unwrap(), moov);
}

#[test]
fn skips_unknown_children_inside_the_tree() {
    use crate::{ByteCursor, Mp4Box};

    let moov = fragmented_movie();

    // splice an unknown box between mvhd and mvex
    let mut cursor = ByteCursor::new();
    cursor.write_u32((moov.size() + 12) as u32).write_utf8_bytes("moov");
    moov.mvhd.write(&mut cursor).unwrap();
    cursor.write_u32(12).write_utf8_bytes("udta").write_u32(0);
    moov.mvex.as_ref().unwrap().write(&mut cursor).unwrap();
    for track in &moov.tracks {
        track.write(&mut cursor).unwrap();
    }

    let decoded = MovieBox::from_bytes(cursor.as_slice()).unwrap();

    assert_eq!(decoded, moov);
}
