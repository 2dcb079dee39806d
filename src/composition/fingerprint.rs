use xxhash_rust::xxh3::Xxh3;

use crate::{
    composition::{
        asset::Asset,
        style::{Coord, TextStyle},
        timeline::Placement,
    },
    foundation::core::canonical_zero,
};

const XXH3_SEED: u64 = 0x5f3c_91d2_a7e4_0b68;

/// Stable 128-bit fingerprint of a timeline's content.
///
/// Logged with every resolution so equivalent compile requests can be correlated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimelineFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

impl std::fmt::Display for TimelineFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

pub(crate) fn fingerprint_placements(placements: &[Placement]) -> TimelineFingerprint {
    let mut h = StableHasher::new();
    h.write_u64(placements.len() as u64);
    for p in placements {
        match p {
            Placement::Inline(v) => {
                h.write_u8(0);
                h.write_str(v.asset_id());
                h.write_f64(v.range().start());
                h.write_opt_f64(v.range().end());
            }
            Placement::Overlay(o) => {
                h.write_u8(1);
                h.write_f64(o.start_offset());
                write_asset(&mut h, o.asset());
            }
        }
    }
    h.finish()
}

fn write_asset(h: &mut StableHasher, asset: &Asset) {
    match asset {
        Asset::Video(a) => {
            h.write_u8(0);
            h.write_str(a.asset_id());
            h.write_f64(a.range().start());
            h.write_opt_f64(a.range().end());
        }
        Asset::Audio(a) => {
            h.write_u8(1);
            h.write_str(a.asset_id());
            h.write_f64(a.range().start());
            h.write_opt_f64(a.range().end());
            h.write_bool(a.disable_other_tracks());
            h.write_f64(a.fade_in_duration());
            h.write_f64(a.fade_out_duration());
        }
        Asset::Image(a) => {
            h.write_u8(2);
            h.write_str(a.asset_id());
            h.write_u64(u64::from(a.width()));
            h.write_u64(u64::from(a.height()));
            h.write_i64(a.x());
            h.write_i64(a.y());
            h.write_opt_f64(a.duration());
        }
        Asset::Text(a) => {
            h.write_u8(3);
            h.write_str(a.text());
            h.write_opt_f64(a.duration());
            write_style(h, a.style());
        }
    }
}

fn write_style(h: &mut StableHasher, s: &TextStyle) {
    h.write_u64(u64::from(s.fontsize));
    h.write_str(&s.fontcolor);
    h.write_str(&s.fontcolor_expr);
    h.write_f64(s.alpha);
    h.write_str(&s.font);
    h.write_bool(s.box_);
    h.write_str(&s.boxcolor);
    h.write_str(&s.boxborderw);
    h.write_u64(u64::from(s.boxw));
    h.write_u64(u64::from(s.boxh));
    h.write_i64(i64::from(s.line_spacing));
    h.write_str(&s.text_align);
    h.write_str(&s.y_align);
    h.write_u64(u64::from(s.borderw));
    h.write_str(&s.bordercolor);
    h.write_str(&s.expansion);
    h.write_i64(s.basetime);
    h.write_bool(s.fix_bounds);
    h.write_bool(s.text_shaping);
    h.write_str(&s.shadowcolor);
    h.write_i64(i64::from(s.shadowx));
    h.write_i64(i64::from(s.shadowy));
    h.write_u64(u64::from(s.tabsize));
    write_coord(h, &s.x);
    write_coord(h, &s.y);
}

fn write_coord(h: &mut StableHasher, c: &Coord) {
    match c {
        Coord::Px(v) => {
            h.write_u8(0);
            h.write_i64(*v);
        }
        Coord::Expr(e) => {
            h.write_u8(1);
            h.write_str(e);
        }
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_i64(&mut self, v: i64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(canonical_zero(v).to_bits());
    }

    fn write_opt_f64(&mut self, v: Option<f64>) {
        match v {
            Some(v) => {
                self.write_u8(1);
                self.write_f64(v);
            }
            None => self.write_u8(0),
        }
    }

    // Length-prefixed so adjacent strings cannot alias.
    fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> TimelineFingerprint {
        let v = self.inner.digest128();
        TimelineFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/fingerprint.rs"]
mod tests;
