use four_cc::FourCC;
use tracing::debug;

use crate::boxes::*;
use crate::{BoxHeader, ByteCursor, MediaDataBox, Mp4Box, Mp4BoxError};

/// A decoded box of any recognized type.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyBox {
    Ftyp(FileTypeBox),
    Moov(MovieBox),
    Mvhd(MovieHeaderBox),
    Trak(TrackBox),
    Tkhd(TrackHeaderBox),
    Mdia(MediaBox),
    Mdhd(MediaHeaderBox),
    Hdlr(HandlerBox),
    Minf(MediaInformationBox),
    Vmhd(VideoMediaHeaderBox),
    Smhd(SoundMediaHeaderBox),
    Dinf(DataInformationBox),
    Dref(DataReferenceBox),
    Url(DataEntryUrlBox),
    Stbl(SampleTableBox),
    Stsd(SampleDescriptionBox),
    Stts(TimeToSampleBox),
    Stsc(SampleToChunkBox),
    Stsz(SampleSizeBox),
    Stco(ChunkOffsetBox),
    Co64(ChunkLargeOffsetBox),
    Mvex(MovieExtendsBox),
    Mehd(MovieExtendsHeaderBox),
    Trex(TrackExtendsBox),
    Moof(MovieFragmentBox),
    Mfhd(MovieFragmentHeaderBox),
    Traf(TrackFragmentBox),
    Tfhd(TrackFragmentHeaderBox),
    Tfdt(TrackFragmentBaseMediaDecodeTimeBox),
    Trun(TrackFragmentRunBox),
    Mdat(MediaDataBox),
}

impl AnyBox {
    pub fn name(&self) -> FourCC {
        match self {
            AnyBox::Ftyp(_) => FileTypeBox::NAME,
            AnyBox::Moov(_) => MovieBox::NAME,
            AnyBox::Mvhd(_) => MovieHeaderBox::NAME,
            AnyBox::Trak(_) => TrackBox::NAME,
            AnyBox::Tkhd(_) => TrackHeaderBox::NAME,
            AnyBox::Mdia(_) => MediaBox::NAME,
            AnyBox::Mdhd(_) => MediaHeaderBox::NAME,
            AnyBox::Hdlr(_) => HandlerBox::NAME,
            AnyBox::Minf(_) => MediaInformationBox::NAME,
            AnyBox::Vmhd(_) => VideoMediaHeaderBox::NAME,
            AnyBox::Smhd(_) => SoundMediaHeaderBox::NAME,
            AnyBox::Dinf(_) => DataInformationBox::NAME,
            AnyBox::Dref(_) => DataReferenceBox::NAME,
            AnyBox::Url(_) => DataEntryUrlBox::NAME,
            AnyBox::Stbl(_) => SampleTableBox::NAME,
            AnyBox::Stsd(_) => SampleDescriptionBox::NAME,
            AnyBox::Stts(_) => TimeToSampleBox::NAME,
            AnyBox::Stsc(_) => SampleToChunkBox::NAME,
            AnyBox::Stsz(_) => SampleSizeBox::NAME,
            AnyBox::Stco(_) => ChunkOffsetBox::NAME,
            AnyBox::Co64(_) => ChunkLargeOffsetBox::NAME,
            AnyBox::Mvex(_) => MovieExtendsBox::NAME,
            AnyBox::Mehd(_) => MovieExtendsHeaderBox::NAME,
            AnyBox::Trex(_) => TrackExtendsBox::NAME,
            AnyBox::Moof(_) => MovieFragmentBox::NAME,
            AnyBox::Mfhd(_) => MovieFragmentHeaderBox::NAME,
            AnyBox::Traf(_) => TrackFragmentBox::NAME,
            AnyBox::Tfhd(_) => TrackFragmentHeaderBox::NAME,
            AnyBox::Tfdt(_) => TrackFragmentBaseMediaDecodeTimeBox::NAME,
            AnyBox::Trun(_) => TrackFragmentRunBox::NAME,
            AnyBox::Mdat(_) => MediaDataBox::NAME,
        }
    }
}

pub type BoxDecoder = fn(&BoxHeader, &mut ByteCursor) -> Result<AnyBox, Mp4BoxError>;

/// Tag-keyed decoder table; dispatch is an explicit lookup, nothing clever.
static DECODERS: &[(FourCC, BoxDecoder)] = &[
    (FileTypeBox::NAME, |h, c| {
        Ok(AnyBox::Ftyp(FileTypeBox::read_box_contents(c, h)?))
    }),
    (MovieBox::NAME, |h, c| {
        Ok(AnyBox::Moov(MovieBox::read_box_contents(c, h)?))
    }),
    (MovieHeaderBox::NAME, |h, c| {
        Ok(AnyBox::Mvhd(MovieHeaderBox::read_box_contents(c, h)?))
    }),
    (TrackBox::NAME, |h, c| {
        Ok(AnyBox::Trak(TrackBox::read_box_contents(c, h)?))
    }),
    (TrackHeaderBox::NAME, |h, c| {
        Ok(AnyBox::Tkhd(TrackHeaderBox::read_box_contents(c, h)?))
    }),
    (MediaBox::NAME, |h, c| {
        Ok(AnyBox::Mdia(MediaBox::read_box_contents(c, h)?))
    }),
    (MediaHeaderBox::NAME, |h, c| {
        Ok(AnyBox::Mdhd(MediaHeaderBox::read_box_contents(c, h)?))
    }),
    (HandlerBox::NAME, |h, c| {
        Ok(AnyBox::Hdlr(HandlerBox::read_box_contents(c, h)?))
    }),
    (MediaInformationBox::NAME, |h, c| {
        Ok(AnyBox::Minf(MediaInformationBox::read_box_contents(c, h)?))
    }),
    (VideoMediaHeaderBox::NAME, |h, c| {
        Ok(AnyBox::Vmhd(VideoMediaHeaderBox::read_box_contents(c, h)?))
    }),
    (SoundMediaHeaderBox::NAME, |h, c| {
        Ok(AnyBox::Smhd(SoundMediaHeaderBox::read_box_contents(c, h)?))
    }),
    (DataInformationBox::NAME, |h, c| {
        Ok(AnyBox::Dinf(DataInformationBox::read_box_contents(c, h)?))
    }),
    (DataReferenceBox::NAME, |h, c| {
        Ok(AnyBox::Dref(DataReferenceBox::read_box_contents(c, h)?))
    }),
    (DataEntryUrlBox::NAME, |h, c| {
        Ok(AnyBox::Url(DataEntryUrlBox::read_box_contents(c, h)?))
    }),
    (SampleTableBox::NAME, |h, c| {
        Ok(AnyBox::Stbl(SampleTableBox::read_box_contents(c, h)?))
    }),
    (SampleDescriptionBox::NAME, |h, c| {
        Ok(AnyBox::Stsd(SampleDescriptionBox::read_box_contents(c, h)?))
    }),
    (TimeToSampleBox::NAME, |h, c| {
        Ok(AnyBox::Stts(TimeToSampleBox::read_box_contents(c, h)?))
    }),
    (SampleToChunkBox::NAME, |h, c| {
        Ok(AnyBox::Stsc(SampleToChunkBox::read_box_contents(c, h)?))
    }),
    (SampleSizeBox::NAME, |h, c| {
        Ok(AnyBox::Stsz(SampleSizeBox::read_box_contents(c, h)?))
    }),
    (ChunkOffsetBox::NAME, |h, c| {
        Ok(AnyBox::Stco(ChunkOffsetBox::read_box_contents(c, h)?))
    }),
    (ChunkLargeOffsetBox::NAME, |h, c| {
        Ok(AnyBox::Co64(ChunkLargeOffsetBox::read_box_contents(c, h)?))
    }),
    (MovieExtendsBox::NAME, |h, c| {
        Ok(AnyBox::Mvex(MovieExtendsBox::read_box_contents(c, h)?))
    }),
    (MovieExtendsHeaderBox::NAME, |h, c| {
        Ok(AnyBox::Mehd(MovieExtendsHeaderBox::read_box_contents(c, h)?))
    }),
    (TrackExtendsBox::NAME, |h, c| {
        Ok(AnyBox::Trex(TrackExtendsBox::read_box_contents(c, h)?))
    }),
    (MovieFragmentBox::NAME, |h, c| {
        Ok(AnyBox::Moof(MovieFragmentBox::read_box_contents(c, h)?))
    }),
    (MovieFragmentHeaderBox::NAME, |h, c| {
        Ok(AnyBox::Mfhd(MovieFragmentHeaderBox::read_box_contents(
            c, h,
        )?))
    }),
    (TrackFragmentBox::NAME, |h, c| {
        Ok(AnyBox::Traf(TrackFragmentBox::read_box_contents(c, h)?))
    }),
    (TrackFragmentHeaderBox::NAME, |h, c| {
        Ok(AnyBox::Tfhd(TrackFragmentHeaderBox::read_box_contents(
            c, h,
        )?))
    }),
    (TrackFragmentBaseMediaDecodeTimeBox::NAME, |h, c| {
        Ok(AnyBox::Tfdt(
            TrackFragmentBaseMediaDecodeTimeBox::read_box_contents(c, h)?,
        ))
    }),
    (TrackFragmentRunBox::NAME, |h, c| {
        Ok(AnyBox::Trun(TrackFragmentRunBox::read_box_contents(c, h)?))
    }),
    (MediaDataBox::NAME, |h, c| {
        Ok(AnyBox::Mdat(MediaDataBox::read_box_contents(c, h)?))
    }),
];

pub fn decoder_for(name: FourCC) -> Option<BoxDecoder> {
    DECODERS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, decoder)| *decoder)
}

/// Decodes the next box in the buffer, dispatching on its type tag.
pub fn read_any_box(cursor: &mut ByteCursor) -> Result<AnyBox, Mp4BoxError> {
    let start = cursor.position();
    let header = BoxHeader::read(cursor)?;

    let decode = decoder_for(header.name).ok_or(Mp4BoxError::UnsupportedBox(header.name))?;
    let value = decode(&header, cursor)?;

    let consumed = (cursor.position() - start) as u64;
    if consumed != header.size {
        return Err(Mp4BoxError::SizeMismatch {
            name: header.name,
            declared: header.size,
            actual: consumed,
        });
    }

    Ok(value)
}

/// Decodes a fully buffered run of sibling boxes.
///
/// Boxes without a registered decoder are skipped over by their declared
/// size so a single exotic box does not end the walk; a box that cannot be
/// framed at all (truncated or lying about its size) still fails the whole
/// call.
pub fn read_boxes(cursor: &mut ByteCursor) -> Result<Vec<AnyBox>, Mp4BoxError> {
    let mut boxes = Vec::new();

    while cursor.remaining() > 0 {
        let start = cursor.position();
        let header = BoxHeader::read(cursor)?;

        match decoder_for(header.name) {
            Some(decode) => {
                let value = decode(&header, cursor)?;

                let consumed = (cursor.position() - start) as u64;
                if consumed != header.size {
                    return Err(Mp4BoxError::SizeMismatch {
                        name: header.name,
                        declared: header.size,
                        actual: consumed,
                    });
                }

                boxes.push(value);
            }
            None => {
                debug!(
                    "skipping unrecognized '{}' box ({} bytes)",
                    header.name, header.size
                );
                cursor.set_position(start + header.size as usize)?;
            }
        }
    }

    Ok(boxes)
}

#[test]
fn dispatches_by_type_tag() {
    let vmhd = VideoMediaHeaderBox::new();
    let mut cursor = ByteCursor::from_slice(&vmhd.to_bytes().unwrap());

    match read_any_box(&mut cursor).unwrap() {
        AnyBox::Vmhd(decoded) => assert_eq!(decoded, vmhd),
        other => panic!("dispatched to {}", other.name()),
    }
}

#[test]
fn unknown_top_level_tags_are_an_error() {
    let mut bytes = vec![0, 0, 0, 8];
    bytes.extend_from_slice(b"uuid");

    let mut cursor = ByteCursor::from_slice(&bytes);

    assert!(matches!(
        read_any_box(&mut cursor),
        Err(Mp4BoxError::UnsupportedBox(name)) if name == FourCC(*b"uuid")
    ));
}

#[test]
fn sibling_walk_skips_unknown_boxes() {
    let mut cursor = ByteCursor::new();

    VideoMediaHeaderBox::new().write(&mut cursor).unwrap();

    // a `free` box nothing registers a decoder for
    cursor.write_u32(12).write_utf8_bytes("free").write_u32(0);

    SoundMediaHeaderBox::new().write(&mut cursor).unwrap();

    cursor.set_position(0).unwrap();
    let boxes = read_boxes(&mut cursor).unwrap();

    assert_eq!(boxes.len(), 2);
    assert_eq!(boxes[0].name(), FourCC(*b"vmhd"));
    assert_eq!(boxes[1].name(), FourCC(*b"smhd"));
}

#[test]
fn sibling_walk_surfaces_decode_errors() {
    let mut cursor = ByteCursor::new();

    // vmhd truncated mid-payload: declared 20 bytes, 14 present
    let vmhd = VideoMediaHeaderBox::new().to_bytes().unwrap();
    cursor.write_bytes(&vmhd[..14]);

    cursor.set_position(0).unwrap();

    assert!(read_boxes(&mut cursor).is_err());
}
