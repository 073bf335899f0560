mod co64;
mod dinf;
mod dref;
mod ftyp;
mod hdlr;
mod mdhd;
mod mdia;
mod mehd;
mod mfhd;
mod minf;
mod moof;
mod moov;
mod mvex;
mod mvhd;
mod smhd;
mod stbl;
mod stco;
mod stsc;
mod stsd;
mod stsz;
mod stts;
mod tfdt;
mod tfhd;
mod tkhd;
mod traf;
mod trak;
mod trex;
mod trun;
mod url;
mod vmhd;

pub use self::{
    co64::*, dinf::*, dref::*, ftyp::*, hdlr::*, mdhd::*, mdia::*, mehd::*, mfhd::*, minf::*,
    moof::*, moov::*, mvex::*, mvhd::*, smhd::*, stbl::*, stco::*, stsc::*, stsd::*, stsz::*,
    stts::*, tfdt::*, tfhd::*, tkhd::*, traf::*, trak::*, trex::*, trun::*, url::*, vmhd::*,
};
