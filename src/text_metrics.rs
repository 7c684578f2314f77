use std::collections::HashMap;
use std::sync::Mutex;

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use ttf_parser::Face;

/// Text measurement collaborator for the legend and LED row.
///
/// The layout engine only looks at the returned pixel widths, so any
/// implementation that agrees on widths produces identical geometry.
pub trait TextMeasure {
    fn width(&self, text: &str, font_size: f32, font_family: &str) -> f32;
}

/// Pure-arithmetic measurer backed by the per-character width table.
/// Deterministic on every machine; the fallback when no usable font can
/// be loaded, and the measurer of choice for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxMeasure;

impl TextMeasure for ApproxMeasure {
    fn width(&self, text: &str, font_size: f32, _font_family: &str) -> f32 {
        approximate_text_width(text, font_size)
    }
}

/// Character widths at a 10px baseline, scaled linearly by font size.
fn char_width_10px(ch: char) -> f32 {
    match ch {
        'i' | 'l' => 2.5,
        'I' | 'j' | '.' | ',' | ':' | ';' | ' ' | '/' | '\\' => 3.0,
        't' | 'f' => 3.5,
        'r' | '-' | '(' | ')' | '[' | ']' | '{' | '}' => 4.0,
        's' | 'z' => 5.0,
        'a' | 'c' | 'e' | 'J' | 'v' | 'x' | 'k' | 'y' => 5.5,
        'o' | 'n' | 'u' | 'b' | 'd' | 'g' | 'h' | 'p' | 'q' | 'L' | '_' => 6.0,
        'F' | 'T' | 'Z' => 6.5,
        'A' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' => 7.0,
        'C' | 'D' | 'H' | 'N' | 'R' | 'U' => 7.5,
        'G' | 'O' | 'Q' => 8.0,
        'w' => 8.5,
        'm' => 9.0,
        'M' => 9.0,
        'W' => 10.0,
        '0'..='9' => 6.0,
        _ => 6.0,
    }
}

pub fn approximate_text_width(text: &str, font_size: f32) -> f32 {
    let total: f32 = text.chars().map(char_width_10px).sum();
    total * (font_size / 10.0)
}

/// Measurer backed by real font metrics via `fontdb` + `ttf-parser`.
///
/// Faces are resolved and cached per font family. Any failure along the
/// way (no system fonts, unparsable face, missing glyphs) degrades to
/// [`approximate_text_width`] for that call; measurement problems are
/// never surfaced to the layout engine.
pub struct FontMeasure {
    inner: Mutex<MeasureState>,
}

struct MeasureState {
    db: Database,
    loaded_system_fonts: bool,
    faces: HashMap<String, Option<LoadedFace>>,
}

struct LoadedFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    ascii_advances: [u16; 128],
}

impl FontMeasure {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MeasureState {
                db: Database::new(),
                loaded_system_fonts: false,
                faces: HashMap::new(),
            }),
        }
    }
}

impl Default for FontMeasure {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasure for FontMeasure {
    fn width(&self, text: &str, font_size: f32, font_family: &str) -> f32 {
        if text.is_empty() || font_size <= 0.0 {
            return 0.0;
        }
        let measured = self
            .inner
            .lock()
            .ok()
            .and_then(|mut state| state.measure(text, font_size, font_family));
        match measured {
            Some(width) => width,
            None => {
                tracing::debug!(font_family, "font measurement unavailable, using approximation");
                approximate_text_width(text, font_size)
            }
        }
    }
}

impl MeasureState {
    fn measure(&mut self, text: &str, font_size: f32, font_family: &str) -> Option<f32> {
        let key = normalize_family_key(font_family);
        if !self.faces.contains_key(&key) {
            let face = self.load_face(font_family);
            self.faces.insert(key.clone(), face);
        }
        let face = self.faces.get(&key)?.as_ref()?;
        face.measure_width(text, font_size)
    }

    fn load_face(&mut self, font_family: &str) -> Option<LoadedFace> {
        let mut names: Vec<String> = Vec::new();
        let mut families: Vec<Family<'_>> = Vec::new();
        for part in font_family.split(',') {
            let raw = part.trim().trim_matches('"').trim_matches('\'');
            if raw.is_empty() {
                continue;
            }
            match raw.to_ascii_lowercase().as_str() {
                "serif" => families.push(Family::Serif),
                "sans-serif" | "system-ui" => families.push(Family::SansSerif),
                "monospace" | "ui-monospace" => families.push(Family::Monospace),
                _ => names.push(raw.to_string()),
            }
        }
        for name in &names {
            families.insert(0, Family::Name(name.as_str()));
        }
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        let mut loaded: Option<LoadedFace> = None;
        self.db.with_face_data(id, |data, index| {
            if let Ok(face) = Face::parse(data, index) {
                let units_per_em = face.units_per_em().max(1);
                let mut ascii_advances = [0u16; 128];
                for byte in 0u8..=127 {
                    if let Some(glyph) = face.glyph_index(byte as char) {
                        ascii_advances[byte as usize] = face.glyph_hor_advance(glyph).unwrap_or(0);
                    }
                }
                loaded = Some(LoadedFace {
                    data: data.to_vec(),
                    index,
                    units_per_em,
                    ascii_advances,
                });
            }
        });
        loaded
    }
}

impl LoadedFace {
    fn measure_width(&self, text: &str, font_size: f32) -> Option<f32> {
        let scale = font_size / self.units_per_em as f32;
        let fallback = font_size * 0.56;

        if text.is_ascii() {
            let mut width = 0.0f32;
            for byte in text.as_bytes() {
                if *byte == b'\n' {
                    continue;
                }
                let advance = self.ascii_advances[*byte as usize];
                if advance == 0 {
                    width += fallback;
                } else {
                    width += advance as f32 * scale;
                }
            }
            return Some(width.max(0.0));
        }

        // Non-ASCII labels are rare; re-parsing the face keeps this type
        // free of self-referential borrows.
        let face = Face::parse(&self.data, self.index).ok()?;
        let mut width = 0.0f32;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            match face.glyph_index(ch) {
                Some(glyph) => {
                    width += face.glyph_hor_advance(glyph).unwrap_or(0) as f32 * scale;
                }
                None => width += fallback,
            }
        }
        Some(width.max(0.0))
    }
}

fn normalize_family_key(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        "sans-serif".to_string()
    } else {
        trimmed.to_string()
    }
}
