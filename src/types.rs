use image::Rgb;
use serde::{Deserialize, Serialize};

/// Represents one canonical facelet color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Unknown,
}

// Indexed by `Color as usize`.
const SWATCHES: [Rgb<u8>; 7] = [
    Rgb([255, 255, 255]),
    Rgb([255, 0, 0]),
    Rgb([255, 165, 0]),
    Rgb([255, 255, 0]),
    Rgb([0, 255, 0]),
    Rgb([0, 0, 255]),
    Rgb([50, 50, 50]),
];

const LETTERS: [char; 7] = ['W', 'R', 'O', 'Y', 'G', 'B', '?'];

impl Color {
    pub const ALL: [Color; 7] = [
        Color::White,
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Unknown,
    ];

    /// Display color used for swatches and the cube net.
    pub fn swatch(self) -> Rgb<u8> {
        SWATCHES[self as usize]
    }

    pub fn letter(self) -> char {
        LETTERS[self as usize]
    }
}

/// Cube faces in scan order. The discriminant is the face's slot in a `CubeGrid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceId {
    Up,
    Left,
    Front,
    Right,
    Back,
    Down,
}

impl FaceId {
    pub const ALL: [FaceId; 6] = [
        FaceId::Up,
        FaceId::Left,
        FaceId::Front,
        FaceId::Right,
        FaceId::Back,
        FaceId::Down,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            FaceId::Up => "UP",
            FaceId::Left => "LEFT",
            FaceId::Front => "FRONT",
            FaceId::Right => "RIGHT",
            FaceId::Back => "BACK",
            FaceId::Down => "DOWN",
        }
    }

    /// Top-left cell of this face in the 12x9 net, as (row, col) in cells.
    pub fn net_origin(self) -> (u32, u32) {
        match self {
            FaceId::Up => (0, 3),
            FaceId::Left => (3, 0),
            FaceId::Front => (3, 3),
            FaceId::Right => (3, 6),
            FaceId::Back => (3, 9),
            FaceId::Down => (6, 3),
        }
    }
}

/// A representative color read from one neighborhood of a frame, RGB order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PixelSample {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The classified 3x3 facelets of one face, row-major
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceGrid {
    pub cells: [[Color; 3]; 3],
}

impl FaceGrid {
    pub fn filled(color: Color) -> Self {
        Self { cells: [[color; 3]; 3] }
    }

    pub fn from_rows(cells: [[Color; 3]; 3]) -> Self {
        Self { cells }
    }

    pub fn get(&self, row: usize, col: usize) -> Color {
        self.cells[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, color: Color) {
        self.cells[row][col] = color;
    }

    /// Cells in row-major order with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(row, cols)| cols.iter().enumerate().map(move |(col, &c)| (row, col, c)))
    }

    /// Facelet letters, one line per row, e.g. `WRO`.
    pub fn to_letters(&self) -> String {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.letter()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for FaceGrid {
    fn default() -> Self {
        Self::filled(Color::White)
    }
}

/// Six face grids indexed by `FaceId`. Every cell always holds a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CubeGrid {
    faces: [FaceGrid; 6],
}

impl CubeGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn face(&self, id: FaceId) -> &FaceGrid {
        &self.faces[id.index()]
    }

    pub fn set_face(&mut self, id: FaceId, grid: FaceGrid) {
        self.faces[id.index()] = grid;
    }
}
