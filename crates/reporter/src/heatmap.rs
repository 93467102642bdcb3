use crate::error::ReportError;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use core_types::{GRID_LAYOUT, ZoneAggregate, ZoneCode, ZoneMetric};
use image::{Rgba, RgbaImage};

/// Edge length of one grid cell in pixels.
pub const CELL_SIZE: u32 = 72;

const COLUMNS: u32 = 3;
const ROWS: u32 = 5;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// dark blue -> grey -> red
const RAMP: [[f64; 3]; 3] = [[0.0, 0.0, 139.0], [128.0, 128.0, 128.0], [255.0, 0.0, 0.0]];

/// An encoded strike-zone heatmap.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneChart {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ZoneChart {
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

/// Draws the 13 zones on the 5x3 grid and encodes the result as PNG.
///
/// Present zones are colored by their normalized value and labelled with the
/// zone number and value. Blank cells and zones without data stay white.
pub fn render_zone_grid(aggregate: &ZoneAggregate) -> Result<ZoneChart, ReportError> {
    let width = COLUMNS * CELL_SIZE + 1;
    let height = ROWS * CELL_SIZE + 1;
    let mut image = RgbaImage::from_pixel(width, height, WHITE);

    for (row, cells) in GRID_LAYOUT.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let left = col as u32 * CELL_SIZE;
            let top = row as u32 * CELL_SIZE;
            let zone = cell.and_then(|code| ZoneCode::new(code).ok());

            let fill = zone
                .and_then(|z| aggregate.normalized(z))
                .map(ramp_color)
                .unwrap_or(WHITE);
            fill_rect(&mut image, left, top, CELL_SIZE, CELL_SIZE, fill);
            stroke_rect(&mut image, left, top, CELL_SIZE, CELL_SIZE, BLACK);

            let Some(zone) = zone else { continue };
            let ink = text_color(fill);
            let number = zone.to_string();
            draw_text_centered(&mut image, left, top + CELL_SIZE * 3 / 10 - 7, CELL_SIZE, &number, 2, ink);
            if let Some(value) = aggregate.get(zone) {
                let label = value_label(aggregate.metric, value);
                draw_text_centered(&mut image, left, top + CELL_SIZE * 7 / 10 - 3, CELL_SIZE, &label, 1, ink);
            }
        }
    }

    let png = encode(image)?;
    tracing::debug!(bytes = png.len(), zones = aggregate.len(), "Rendered zone heatmap.");
    Ok(ZoneChart { png, width, height })
}

fn value_label(metric: ZoneMetric, value: f64) -> String {
    match metric {
        ZoneMetric::MeanExitVelocity => format!("{value:.1} mph"),
        ZoneMetric::SwingCount => format!("{value:.0}"),
    }
}

fn ramp_color(t: f64) -> Rgba<u8> {
    let t = t.clamp(0.0, 1.0);
    let (from, to, blend) = if t <= 0.5 {
        (RAMP[0], RAMP[1], t * 2.0)
    } else {
        (RAMP[1], RAMP[2], (t - 0.5) * 2.0)
    };
    let channel = |i: usize| (from[i] + (to[i] - from[i]) * blend).round() as u8;
    Rgba([channel(0), channel(1), channel(2), 255])
}

/// Black on light cells, white on dark ones.
fn text_color(fill: Rgba<u8>) -> Rgba<u8> {
    let [r, g, b, _] = fill.0;
    let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    if luminance < 96.0 { WHITE } else { BLACK }
}

fn fill_rect(image: &mut RgbaImage, left: u32, top: u32, w: u32, h: u32, color: Rgba<u8>) {
    for y in top..(top + h).min(image.height()) {
        for x in left..(left + w).min(image.width()) {
            image.put_pixel(x, y, color);
        }
    }
}

fn stroke_rect(image: &mut RgbaImage, left: u32, top: u32, w: u32, h: u32, color: Rgba<u8>) {
    fill_rect(image, left, top, w + 1, 1, color);
    fill_rect(image, left, top + h, w + 1, 1, color);
    fill_rect(image, left, top, 1, h + 1, color);
    fill_rect(image, left + w, top, 1, h + 1, color);
}

fn draw_text_centered(
    image: &mut RgbaImage,
    left: u32,
    top: u32,
    span: u32,
    text: &str,
    scale: u32,
    color: Rgba<u8>,
) {
    let advance = (GLYPH_WIDTH + 1) * scale;
    let text_width = (text.chars().count() as u32 * advance).saturating_sub(scale);
    let mut x = left + span.saturating_sub(text_width) / 2;

    for ch in text.to_ascii_uppercase().chars() {
        if let Some(rows) = glyph_rows(ch) {
            for (row_idx, row) in rows.iter().enumerate() {
                for (col_idx, pixel) in row.chars().enumerate() {
                    if pixel != ' ' {
                        let px = x + col_idx as u32 * scale;
                        let py = top + row_idx as u32 * scale;
                        fill_rect(image, px, py, scale, scale, color);
                    }
                }
            }
        }
        x = x.saturating_add(advance);
    }
}

fn encode(image: RgbaImage) -> Result<Vec<u8>, ReportError> {
    let (width, height) = image.dimensions();
    let mut buffer = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buffer, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&image.into_raw())?;
        writer.finish()?;
    }
    Ok(buffer)
}

const GLYPH_WIDTH: u32 = 5;

/// 5x7 bitmap glyphs for the characters a zone label can contain.
fn glyph_rows(ch: char) -> Option<&'static [&'static str; 7]> {
    match ch {
        '0' => Some(&[" ### ", "#   #", "#  ##", "# # #", "##  #", "#   #", " ### "]),
        '1' => Some(&["  #  ", " ##  ", "  #  ", "  #  ", "  #  ", "  #  ", " ### "]),
        '2' => Some(&[" ### ", "#   #", "    #", "   # ", "  #  ", " #   ", "#####"]),
        '3' => Some(&["#####", "   # ", "  #  ", "   # ", "    #", "#   #", " ### "]),
        '4' => Some(&["   # ", "  ## ", " # # ", "#  # ", "#####", "   # ", "   # "]),
        '5' => Some(&["#####", "#    ", "#### ", "    #", "    #", "#   #", " ### "]),
        '6' => Some(&["  ## ", " #   ", "#    ", "#### ", "#   #", "#   #", " ### "]),
        '7' => Some(&["#####", "    #", "   # ", "  #  ", " #   ", " #   ", " #   "]),
        '8' => Some(&[" ### ", "#   #", "#   #", " ### ", "#   #", "#   #", " ### "]),
        '9' => Some(&[" ### ", "#   #", "#   #", " ####", "    #", "   # ", " ##  "]),
        '.' => Some(&["     ", "     ", "     ", "     ", "     ", " ##  ", " ##  "]),
        '-' => Some(&["     ", "     ", "     ", "#####", "     ", "     ", "     "]),
        'M' => Some(&["#   #", "## ##", "# # #", "# # #", "#   #", "#   #", "#   #"]),
        'P' => Some(&["#### ", "#   #", "#   #", "#### ", "#    ", "#    ", "#    "]),
        'H' => Some(&["#   #", "#   #", "#   #", "#####", "#   #", "#   #", "#   #"]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn decode(png_bytes: &[u8]) -> (png::OutputInfo, Vec<u8>) {
        let decoder = png::Decoder::new(png_bytes);
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        (info, buf)
    }

    fn pixel(buf: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * width + x) * 4) as usize;
        [buf[idx], buf[idx + 1], buf[idx + 2], buf[idx + 3]]
    }

    /// A point inside a cell, clear of its border and labels.
    fn cell_probe(row: u32, col: u32) -> (u32, u32) {
        (col * CELL_SIZE + 3, row * CELL_SIZE + 3)
    }

    fn aggregate(values: &[(u8, f64)]) -> ZoneAggregate {
        let map: BTreeMap<ZoneCode, f64> = values
            .iter()
            .map(|(zone, v)| (ZoneCode::new(*zone).unwrap(), *v))
            .collect();
        ZoneAggregate::new(ZoneMetric::MeanExitVelocity, map)
    }

    #[test]
    fn chart_is_a_png_of_the_fixed_grid_size() {
        let chart = render_zone_grid(&aggregate(&[(1, 70.0), (2, 80.0)])).unwrap();

        assert_eq!(&chart.png[..8], b"\x89PNG\r\n\x1a\n");
        let (info, _) = decode(&chart.png);
        assert_eq!(info.width, 3 * CELL_SIZE + 1);
        assert_eq!(info.height, 5 * CELL_SIZE + 1);
        assert_eq!((chart.width, chart.height), (info.width, info.height));
    }

    #[test]
    fn zones_are_colored_by_normalized_value() {
        // zone 1 is at grid row 1 col 0, zone 2 at row 1 col 1
        let chart = render_zone_grid(&aggregate(&[(1, 70.0), (2, 80.0)])).unwrap();
        let (info, buf) = decode(&chart.png);

        let (x, y) = cell_probe(1, 0);
        assert_eq!(pixel(&buf, info.width, x, y), [0, 0, 139, 255]);
        let (x, y) = cell_probe(1, 1);
        assert_eq!(pixel(&buf, info.width, x, y), [255, 0, 0, 255]);
    }

    #[test]
    fn blank_and_missing_zones_stay_white() {
        let chart = render_zone_grid(&aggregate(&[(5, 75.0)])).unwrap();
        let (info, buf) = decode(&chart.png);

        // blank cell between zones 10 and 11
        let (x, y) = cell_probe(0, 1);
        assert_eq!(pixel(&buf, info.width, x, y), WHITE.0);
        // zone 9 has no data
        let (x, y) = cell_probe(3, 2);
        assert_eq!(pixel(&buf, info.width, x, y), WHITE.0);
        // a single present zone sits at the bottom of the ramp
        let (x, y) = cell_probe(2, 1);
        assert_eq!(pixel(&buf, info.width, x, y), [0, 0, 139, 255]);
    }

    #[test]
    fn cells_have_black_borders_and_labels() {
        let chart = render_zone_grid(&aggregate(&[(5, 75.0)])).unwrap();
        let (info, buf) = decode(&chart.png);

        assert_eq!(pixel(&buf, info.width, 0, 0), BLACK.0);
        assert_eq!(pixel(&buf, info.width, CELL_SIZE, CELL_SIZE + 10), BLACK.0);

        // zone 5 (row 2, col 1) is dark blue, so its label is drawn in white
        let has_white_ink = (2 * CELL_SIZE + 1..3 * CELL_SIZE)
            .flat_map(|y| (CELL_SIZE + 1..2 * CELL_SIZE).map(move |x| (x, y)))
            .any(|(x, y)| pixel(&buf, info.width, x, y) == WHITE.0);
        assert!(has_white_ink);
    }

    #[test]
    fn ramp_passes_through_grey() {
        assert_eq!(ramp_color(0.5), Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn data_uri_is_base64_png() {
        let chart = render_zone_grid(&aggregate(&[])).unwrap();

        assert!(chart.data_uri().starts_with("data:image/png;base64,iVBORw0KGgo"));
    }
}
