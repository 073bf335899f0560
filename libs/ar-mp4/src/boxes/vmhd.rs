use four_cc::FourCC;

use crate::Mp4BoxError;
use crate::{BoxHeader, ByteCursor, FullBoxHeader, Mp4Box};

use std::mem::size_of;

/// ISO/IEC 14496-12 12.1.2, video media header.
///
/// `graphics_mode` 0 is plain copy composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMediaHeaderBox {
    pub graphics_mode: u16,
    pub opcolor: [u16; 3],
}

impl VideoMediaHeaderBox {
    pub fn new() -> Self {
        VideoMediaHeaderBox {
            graphics_mode: 0,
            opcolor: [0, 0, 0],
        }
    }
}

impl Default for VideoMediaHeaderBox {
    fn default() -> Self {
        VideoMediaHeaderBox::new()
    }
}

impl Mp4Box for VideoMediaHeaderBox {
    const NAME: FourCC = FourCC(*b"vmhd");

    fn get_full_box_header(&self) -> Option<FullBoxHeader> {
        Some(FullBoxHeader::new(0, 0))
    }

    fn content_size(&self) -> u64 {
        size_of::<u16>() as u64 + // graphicsmode
        (size_of::<u16>() as u64 * 3) // opcolor
    }

    fn write_box_contents(&self, cursor: &mut ByteCursor) -> Result<(), Mp4BoxError> {
        cursor
            .write_u16(self.graphics_mode)
            .write_u16(self.opcolor[0])
            .write_u16(self.opcolor[1])
            .write_u16(self.opcolor[2]);

        Ok(())
    }

    fn read_box_contents(cursor: &mut ByteCursor, _header: &BoxHeader) -> Result<Self, Mp4BoxError> {
        let _ = FullBoxHeader::read(cursor)?;

        let graphics_mode = cursor.read_u16()?;
        let opcolor = [cursor.read_u16()?, cursor.read_u16()?, cursor.read_u16()?];

        Ok(VideoMediaHeaderBox {
            graphics_mode,
            opcolor,
        })
    }
}

#[test]
fn encodes_the_reference_bytes() {
    let vmhd = VideoMediaHeaderBox {
        graphics_mode: 0x0040,
        opcolor: [0x1111, 0x2222, 0x3333],
    };

    let bytes = vmhd.to_bytes().unwrap();

    assert_eq!(
        &bytes[..],
        &[
            0x00, 0x00, 0x00, 0x14, 0x76, 0x6d, 0x68, 0x64, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40,
            0x11, 0x11, 0x22, 0x22, 0x33, 0x33,
        ]
    );

    let decoded = VideoMediaHeaderBox::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, vmhd);
}

#[test]
fn is_always_20_bytes() {
    let boxes = [
        VideoMediaHeaderBox::new(),
        VideoMediaHeaderBox {
            graphics_mode: u16::MAX,
            opcolor: [u16::MAX; 3],
        },
    ];

    for vmhd in boxes {
        let bytes = vmhd.to_bytes().unwrap();

        assert_eq!(bytes.len(), 20);
        // the size field itself agrees
        assert_eq!(&bytes[..4], &[0, 0, 0, 20]);
        assert_eq!(&bytes[4..8], b"vmhd");
    }
}

#[test]
fn round_trips() {
    let vmhd = VideoMediaHeaderBox {
        graphics_mode: 3,
        opcolor: [1, 2, 3],
    };

    let decoded = VideoMediaHeaderBox::from_bytes(&vmhd.to_bytes().unwrap()).unwrap();

    assert_eq!(decoded, vmhd);
    // encoding is a pure transform
    assert_eq!(vmhd.to_bytes().unwrap(), decoded.to_bytes().unwrap());
}

#[test]
fn rejects_truncated_input() {
    let bytes = VideoMediaHeaderBox::new().to_bytes().unwrap();

    for len in 0..bytes.len() {
        assert!(matches!(
            VideoMediaHeaderBox::from_bytes(&bytes[..len]),
            Err(Mp4BoxError::UnexpectedEof { .. })
        ));
    }
}

#[test]
fn rejects_a_size_that_disagrees_with_the_payload() {
    let mut bytes = VideoMediaHeaderBox::new().to_bytes().unwrap().to_vec();
    bytes[3] = 22;
    bytes.extend_from_slice(&[0, 0]);

    assert!(matches!(
        VideoMediaHeaderBox::from_bytes(&bytes),
        Err(Mp4BoxError::SizeMismatch {
            declared: 22,
            actual: 20,
            ..
        })
    ));
}

#[test]
fn rejects_a_foreign_type_tag() {
    let mut bytes = VideoMediaHeaderBox::new().to_bytes().unwrap().to_vec();
    bytes[4..8].copy_from_slice(b"smhd");

    assert!(matches!(
        VideoMediaHeaderBox::from_bytes(&bytes),
        Err(Mp4BoxError::UnexpectedBox { .. })
    ));
}
