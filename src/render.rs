//! Swatch images for user feedback: the capture overlay, a single face and the cube net.

use image::{Rgb, RgbImage};

use crate::capture::GridGeometry;
use crate::font::{draw_text_line, measure_text_width};
use crate::types::{CubeGrid, FaceGrid, FaceId};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const NET_BACKGROUND: Rgb<u8> = Rgb([30, 30, 30]);

const FACE_PADDING: u32 = 50;
const NET_GAP: u32 = 5;
const HINT_SCALE: u32 = 2;

pub const CAPTURE_HINT: &str = "PRESS SPACE TO CAPTURE";
pub const REVIEW_HINT: &str = "[R] RESCAN  [N] NEXT";

pub fn fill_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    let x_end = x.saturating_add(w).min(img.width());
    let y_end = y.saturating_add(h).min(img.height());
    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, color);
        }
    }
}

/// Border drawn inside the rectangle, `thickness` pixels wide.
pub fn stroke_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, thickness: u32, color: Rgb<u8>) {
    let t = thickness.min(w).min(h);
    fill_rect(img, x, y, w, t, color);
    fill_rect(img, x, y + h - t, w, t, color);
    fill_rect(img, x, y, t, h, color);
    fill_rect(img, x + w - t, y, t, h, color);
}

fn draw_swatch(img: &mut RgbImage, x: u32, y: u32, size: u32, color: Rgb<u8>) {
    fill_rect(img, x, y, size, size, color);
    stroke_rect(img, x, y, size, size, 2, BLACK);
}

/// Draws the 3x3 alignment grid and the capture hint onto a preview frame.
/// Frames too small for the grid only get the hint.
pub fn draw_grid_overlay(frame: &mut RgbImage, box_size: u32) {
    if let Ok(g) = GridGeometry::from_frame(frame.width(), frame.height(), box_size) {
        let span = g.span();
        for i in 0..=3 {
            let offset = i * box_size;
            // horizontal, then vertical
            fill_rect(frame, g.start_x, (g.start_y + offset).saturating_sub(1), span, 2, WHITE);
            fill_rect(frame, (g.start_x + offset).saturating_sub(1), g.start_y, 2, span, WHITE);
        }
    }
    draw_text_line(frame, 30, 30, CAPTURE_HINT, WHITE, HINT_SCALE);
}

pub fn render_face(grid: &FaceGrid, box_size: u32) -> RgbImage {
    let size = 3 * box_size;
    let mut img = RgbImage::from_pixel(size, size + FACE_PADDING, BLACK);
    for (row, col, color) in grid.iter() {
        draw_swatch(&mut img, col as u32 * box_size, row as u32 * box_size, box_size, color.swatch());
    }
    let hint_x = size.saturating_sub(measure_text_width(REVIEW_HINT, HINT_SCALE)) / 2;
    draw_text_line(&mut img, hint_x, size + 20, REVIEW_HINT, WHITE, HINT_SCALE);
    img
}

/// Cross-shaped net: Up on top, Left/Front/Right/Back across, Down below.
pub fn render_cube(cube: &CubeGrid, box_size: u32) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(12 * box_size, 9 * box_size, NET_BACKGROUND);
    let cell = box_size.saturating_sub(NET_GAP).max(1);

    for face in FaceId::ALL {
        let (net_row, net_col) = face.net_origin();
        stroke_rect(
            &mut canvas,
            net_col * box_size,
            net_row * box_size,
            3 * box_size,
            3 * box_size,
            4,
            WHITE,
        );
        for (row, col, color) in cube.face(face).iter() {
            let x = (net_col + col as u32) * box_size;
            let y = (net_row + row as u32) * box_size;
            draw_swatch(&mut canvas, x, y, cell, color.swatch());
        }
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn test_face_image_layout() {
        let mut grid = FaceGrid::default();
        grid.set(0, 0, Color::Red);
        grid.set(1, 2, Color::Blue);
        grid.set(2, 1, Color::Unknown);
        let img = render_face(&grid, 60);

        assert_eq!(img.dimensions(), (180, 230));
        assert_eq!(*img.get_pixel(30, 30), Color::Red.swatch());
        assert_eq!(*img.get_pixel(150, 90), Color::Blue.swatch());
        assert_eq!(*img.get_pixel(90, 150), Color::Unknown.swatch());
        assert_eq!(*img.get_pixel(90, 90), Color::White.swatch());
        // cell border
        assert_eq!(*img.get_pixel(60, 30), BLACK);
    }

    #[test]
    fn test_cube_net_places_faces_in_cross() {
        let mut cube = CubeGrid::new();
        cube.set_face(FaceId::Up, FaceGrid::filled(Color::Yellow));
        cube.set_face(FaceId::Back, FaceGrid::filled(Color::Green));
        cube.set_face(FaceId::Down, FaceGrid::filled(Color::Orange));
        let img = render_cube(&cube, 60);

        assert_eq!(img.dimensions(), (720, 540));
        // centre cell of each face
        assert_eq!(*img.get_pixel(4 * 60 + 27, 60 + 27), Color::Yellow.swatch());
        assert_eq!(*img.get_pixel(10 * 60 + 27, 4 * 60 + 27), Color::Green.swatch());
        assert_eq!(*img.get_pixel(4 * 60 + 27, 7 * 60 + 27), Color::Orange.swatch());
        // unscanned face shows white
        assert_eq!(*img.get_pixel(60 + 27, 4 * 60 + 27), Color::White.swatch());
        // empty corners of the net keep the background
        assert_eq!(*img.get_pixel(30, 30), NET_BACKGROUND);
    }

    #[test]
    fn test_overlay_draws_grid_lines() {
        let mut frame = RgbImage::from_pixel(400, 400, BLACK);
        draw_grid_overlay(&mut frame, 60);
        assert_eq!(*frame.get_pixel(200, 110), WHITE);
        assert_eq!(*frame.get_pixel(170, 200), WHITE);
        assert_eq!(*frame.get_pixel(140, 140), BLACK);
    }

    #[test]
    fn test_overlay_on_tiny_frame_does_not_panic() {
        let mut frame = RgbImage::new(40, 40);
        draw_grid_overlay(&mut frame, 60);
    }
}
