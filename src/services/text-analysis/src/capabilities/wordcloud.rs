//! Word cloud rendering
//!
//! Words are counted without stopwords, sized by frequency and placed along an
//! Archimedean spiral starting at the canvas centre. A word that does not fit
//! is retried at smaller sizes down to `min_font_size`, then skipped. The
//! canvas is drawn with the bitmap font and encoded as PNG.

use std::collections::HashMap;
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::png::PngEncoder;
use image::{ImageEncoder, Rgb, RgbImage};
use nlp_examples_shared::{PlacedWord, WordCloudImage};
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use super::glyphs::{self, GLYPH_HEIGHT, GLYPH_SPACING, GLYPH_WIDTH};
use super::stopwords::StopwordSet;
use super::WordCloudRenderer;
use crate::config::WordCloudConfig;
use crate::error::CapabilityError;

const MARGIN: u32 = 2;

const PALETTE: [Rgb<u8>; 6] = [
    Rgb([68, 170, 255]),
    Rgb([255, 196, 61]),
    Rgb([120, 220, 120]),
    Rgb([239, 110, 110]),
    Rgb([190, 140, 255]),
    Rgb([250, 250, 250]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

/// Cells already covered by a placed word, with a summed-area table so a
/// rectangle can be tested in constant time
struct Occupancy {
    width: u32,
    height: u32,
    cells: Vec<bool>,
    sums: Vec<u32>,
}

impl Occupancy {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; (width * height) as usize],
            sums: vec![0; ((width + 1) * (height + 1)) as usize],
        }
    }

    fn sum_at(&self, x: u32, y: u32) -> u32 {
        self.sums[(y * (self.width + 1) + x) as usize]
    }

    fn is_free(&self, rect: Rect) -> bool {
        if rect.x + rect.width > self.width || rect.y + rect.height > self.height {
            return false;
        }
        let x0 = rect.x.saturating_sub(MARGIN);
        let y0 = rect.y.saturating_sub(MARGIN);
        let x1 = (rect.x + rect.width + MARGIN).min(self.width);
        let y1 = (rect.y + rect.height + MARGIN).min(self.height);

        self.sum_at(x1, y1) + self.sum_at(x0, y0) == self.sum_at(x0, y1) + self.sum_at(x1, y0)
    }

    fn fill(&mut self, rect: Rect) {
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                self.cells[(y * self.width + x) as usize] = true;
            }
        }
        self.rebuild_sums();
    }

    fn rebuild_sums(&mut self) {
        let stride = (self.width + 1) as usize;
        for y in 0..self.height as usize {
            let mut row = 0;
            for x in 0..self.width as usize {
                row += u32::from(self.cells[y * self.width as usize + x]);
                self.sums[(y + 1) * stride + x + 1] = self.sums[y * stride + x + 1] + row;
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct BitmapWordCloud {
    config: WordCloudConfig,
    stopwords: Arc<StopwordSet>,
}

impl BitmapWordCloud {
    pub fn new(config: WordCloudConfig, stopwords: Arc<StopwordSet>) -> Self {
        Self { config, stopwords }
    }

    /// Word counts, most frequent first; ties keep the order of first appearance
    pub fn frequencies(&self, text: &str) -> Vec<(String, usize)> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut order: Vec<String> = Vec::new();

        for word in text.unicode_words() {
            let word = word.to_lowercase();
            if self.stopwords.contains(&word) || word.chars().all(|c| c.is_numeric()) {
                continue;
            }
            let count = counts.entry(word.clone()).or_insert(0);
            if *count == 0 {
                order.push(word);
            }
            *count += 1;
        }

        let mut frequencies: Vec<(String, usize)> = order
            .into_iter()
            .map(|word| {
                let count = counts[&word];
                (word, count)
            })
            .collect();
        frequencies.sort_by(|a, b| b.1.cmp(&a.1));
        frequencies.truncate(self.config.max_words);
        frequencies
    }

    fn max_font_size(&self) -> u32 {
        (self.config.height / 2).max(self.config.min_font_size)
    }

    fn font_size(&self, frequency: usize, max_frequency: usize) -> f64 {
        let rs = self.config.relative_scaling;
        let ratio = frequency as f64 / max_frequency as f64;
        self.max_font_size() as f64 * (rs * ratio + (1.0 - rs))
    }

    /// First free spot along the spiral for a `width` x `height` box
    fn find_position(&self, occupancy: &Occupancy, width: u32, height: u32) -> Option<Rect> {
        let canvas_w = self.config.width;
        let canvas_h = self.config.height;
        if width > canvas_w || height > canvas_h {
            return None;
        }

        let centre_x = (canvas_w - width) as f64 / 2.0;
        let centre_y = (canvas_h - height) as f64 / 2.0;
        let aspect = canvas_h as f64 / canvas_w as f64;
        let max_radius = (canvas_w.max(canvas_h)) as f64;
        // radius grows four pixels per turn
        let growth = 4.0 / std::f64::consts::TAU;

        let mut theta: f64 = 0.0;
        loop {
            let radius = growth * theta;
            if radius > max_radius {
                return None;
            }

            let x = centre_x + radius * theta.cos();
            let y = centre_y + radius * aspect * theta.sin();
            if x >= 0.0 && y >= 0.0 {
                let rect = Rect {
                    x: x.round() as u32,
                    y: y.round() as u32,
                    width,
                    height,
                };
                if occupancy.is_free(rect) {
                    return Some(rect);
                }
            }

            theta += (2.0 / (radius + 1.0)).min(0.5);
        }
    }

    fn layout(&self, frequencies: &[(String, usize)]) -> Vec<(PlacedWord, u32)> {
        let mut occupancy = Occupancy::new(self.config.width, self.config.height);
        let mut placed = Vec::new();
        let max_frequency = match frequencies.first() {
            Some((_, f)) => *f,
            None => return placed,
        };
        let min_scale = self.config.min_font_size.div_ceil(GLYPH_HEIGHT).max(1);
        // a word never renders larger than a more frequent one placed before it
        let mut ceiling = u32::MAX;

        for (word, frequency) in frequencies {
            let size = self.font_size(*frequency, max_frequency);
            if size < self.config.min_font_size as f64 {
                continue;
            }

            let mut scale = ((size / GLYPH_HEIGHT as f64).round() as u32)
                .max(1)
                .min(ceiling);
            let position = loop {
                let (w, h) = glyphs::text_size(word, scale);
                if let Some(rect) = self.find_position(&occupancy, w, h) {
                    break Some(rect);
                }
                if scale <= min_scale {
                    break None;
                }
                scale -= 1;
            };

            match position {
                Some(rect) => {
                    occupancy.fill(rect);
                    ceiling = scale;
                    placed.push((
                        PlacedWord {
                            word: word.clone(),
                            frequency: *frequency,
                            font_size: scale * GLYPH_HEIGHT,
                            x: rect.x,
                            y: rect.y,
                        },
                        scale,
                    ));
                }
                None => debug!("No room left for '{}', skipping", word),
            }
        }

        placed
    }

    fn draw(&self, placed: &[(PlacedWord, u32)]) -> RgbImage {
        let mut canvas = RgbImage::new(self.config.width, self.config.height);

        for (index, (word, scale)) in placed.iter().enumerate() {
            let colour = PALETTE[index % PALETTE.len()];
            let advance = (GLYPH_WIDTH + GLYPH_SPACING) * scale;

            for (i, c) in word.word.chars().enumerate() {
                let origin_x = word.x + i as u32 * advance;
                for row in 0..GLYPH_HEIGHT {
                    for col in 0..GLYPH_WIDTH {
                        if !glyphs::is_set(c, col, row) {
                            continue;
                        }
                        for dy in 0..*scale {
                            for dx in 0..*scale {
                                let px = origin_x + col * scale + dx;
                                let py = word.y + row * scale + dy;
                                if px < canvas.width() && py < canvas.height() {
                                    canvas.put_pixel(px, py, colour);
                                }
                            }
                        }
                    }
                }
            }
        }

        canvas
    }
}

fn encode_png(canvas: &RgbImage) -> Result<Vec<u8>, CapabilityError> {
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer).write_image(
        canvas.as_raw(),
        canvas.width(),
        canvas.height(),
        image::ColorType::Rgb8,
    )?;
    Ok(buffer)
}

impl WordCloudRenderer for BitmapWordCloud {
    fn render(&self, text: &str) -> Result<WordCloudImage, CapabilityError> {
        let frequencies = self.frequencies(text);
        if frequencies.is_empty() {
            return Err(CapabilityError::TooShort(
                "no words left to plot after removing stopwords".to_string(),
            ));
        }

        let placed = self.layout(&frequencies);
        if placed.is_empty() {
            return Err(CapabilityError::Rendering(
                "no word fits on the canvas".to_string(),
            ));
        }

        let png = encode_png(&self.draw(&placed))?;
        debug!(
            "Word cloud: {} of {} words placed, {} bytes",
            placed.len(),
            frequencies.len(),
            png.len()
        );

        Ok(WordCloudImage {
            width: self.config.width,
            height: self.config.height,
            format: "png".to_string(),
            data_base64: STANDARD.encode(png),
            words: placed.into_iter().map(|(word, _)| word).collect(),
        })
    }
}
