use image::RgbImage;

use crate::types::PixelSample;

/// Per-channel median of the `region` x `region` square centered on
/// (`center_x`, `center_y`).
///
/// Pixels outside the frame are skipped, not padded. Channels are sorted
/// independently, so the result need not be a pixel that exists in the frame.
/// For an even count the upper median is taken. Returns `None` when the square
/// does not overlap the frame at all.
pub fn sample_median(frame: &RgbImage, center_x: i64, center_y: i64, region: u32) -> Option<PixelSample> {
    let half = (region / 2) as i64;
    let (width, height) = (frame.width() as i64, frame.height() as i64);

    let capacity = (region as usize) * (region as usize);
    let mut reds = Vec::with_capacity(capacity);
    let mut greens = Vec::with_capacity(capacity);
    let mut blues = Vec::with_capacity(capacity);

    for y in (center_y - half)..=(center_y + half) {
        if y < 0 || y >= height {
            continue;
        }
        for x in (center_x - half)..=(center_x + half) {
            if x < 0 || x >= width {
                continue;
            }
            let px = frame.get_pixel(x as u32, y as u32);
            reds.push(px[0]);
            greens.push(px[1]);
            blues.push(px[2]);
        }
    }

    if reds.is_empty() {
        return None;
    }

    reds.sort_unstable();
    greens.sort_unstable();
    blues.sort_unstable();
    let mid = reds.len() / 2;
    Some(PixelSample::new(reds[mid], greens[mid], blues[mid]))
}
