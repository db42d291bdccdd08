//! Digit typeface loading
//!
//! A typeface is a small JSON document mapping each digit to a fixed-height
//! raster of `#` (ink) and `.` (blank) rows. The document can live on disk
//! or behind an http(s) URL:
//!
//! ```json
//! {
//!   "name": "blocky",
//!   "glyphs": {
//!     "0": ["###", "#.#", "#.#", "#.#", "###"],
//!     "1": [".#.", "##.", ".#.", ".#.", "###"]
//!   }
//! }
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use super::AssetError;

/// Raw document shape, before validation
#[derive(Debug, Deserialize)]
struct TypefaceDoc {
    name: String,
    glyphs: HashMap<String, Vec<String>>,
}

/// The inked shape of one digit
#[derive(Debug, Clone)]
pub struct GlyphRaster {
    width: usize,
    rows: Vec<Vec<bool>>,
}

impl GlyphRaster {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// True when the cell at (row, col) is inked. Out-of-range reads are blank.
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        self.rows
            .get(row)
            .map_or(false, |r| r.get(col).copied().unwrap_or(false))
    }
}

/// A validated typeface: every glyph the same height, `0` and `1` present
#[derive(Debug, Clone)]
pub struct DigitFace {
    name: String,
    height: usize,
    glyphs: HashMap<char, GlyphRaster>,
}

impl DigitFace {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared raster height, in rows
    pub fn line_height(&self) -> usize {
        self.height
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn raster(&self, digit: char) -> Option<&GlyphRaster> {
        self.glyphs.get(&digit)
    }
}

/// Parse and validate a typeface document
pub fn parse_typeface(json: &str) -> Result<DigitFace, AssetError> {
    let doc: TypefaceDoc = serde_json::from_str(json)?;

    let mut glyphs = HashMap::new();
    let mut height: Option<usize> = None;

    for (key, rows) in &doc.glyphs {
        let mut chars = key.chars();
        let (Some(digit), None) = (chars.next(), chars.next()) else {
            return Err(AssetError::InvalidTypeface(format!(
                "glyph key {:?} is not a single character",
                key
            )));
        };

        if rows.is_empty() {
            return Err(AssetError::InvalidTypeface(format!(
                "glyph '{}' has no rows",
                digit
            )));
        }
        match height {
            None => height = Some(rows.len()),
            Some(h) if h != rows.len() => {
                return Err(AssetError::InvalidTypeface(format!(
                    "glyph '{}' is {} rows tall, expected {}",
                    digit,
                    rows.len(),
                    h
                )));
            }
            Some(_) => {}
        }

        let width = rows[0].chars().count();
        if width == 0 {
            return Err(AssetError::InvalidTypeface(format!(
                "glyph '{}' has empty rows",
                digit
            )));
        }

        let mut grid = Vec::with_capacity(rows.len());
        for row in rows {
            if row.chars().count() != width {
                return Err(AssetError::InvalidTypeface(format!(
                    "glyph '{}' has ragged rows",
                    digit
                )));
            }
            let mut cells = Vec::with_capacity(width);
            for c in row.chars() {
                match c {
                    '#' => cells.push(true),
                    '.' => cells.push(false),
                    other => {
                        return Err(AssetError::InvalidTypeface(format!(
                            "glyph '{}' contains unexpected character '{}'",
                            digit, other
                        )));
                    }
                }
            }
            grid.push(cells);
        }

        glyphs.insert(digit, GlyphRaster { width, rows: grid });
    }

    for required in ['0', '1'] {
        if !glyphs.contains_key(&required) {
            return Err(AssetError::InvalidTypeface(format!(
                "missing glyph for '{}'",
                required
            )));
        }
    }

    Ok(DigitFace {
        name: doc.name,
        height: height.unwrap_or_default(),
        glyphs,
    })
}

/// Load a typeface from a local path or an http(s) URL
pub async fn load_typeface(source: &str) -> Result<DigitFace, AssetError> {
    let text = if is_url(source) {
        fetch_text(source).await?
    } else {
        tokio::fs::read_to_string(source)
            .await
            .map_err(|e| AssetError::Read {
                path: source.to_string(),
                source: e,
            })?
    };
    parse_typeface(&text)
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

async fn fetch_text(url: &str) -> Result<String, AssetError> {
    let response = reqwest::get(url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AssetError::Fetch {
            url: url.to_string(),
            source: e,
        })?;
    response.text().await.map_err(|e| AssetError::Fetch {
        url: url.to_string(),
        source: e,
    })
}
