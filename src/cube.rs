use serde::{Deserialize, Serialize};

use crate::types::{Color, FaceGrid, FaceId};

/// Receives classified colors for accepted faces.
pub trait CubeState {
    fn set_color(&mut self, face: FaceId, row: usize, col: usize, color: Color);
}

/// Plain color store for a scanned cube, faces indexed by `FaceId`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorCube {
    pub faces: [FaceGrid; 6],
}

impl ColorCube {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn face(&self, face: FaceId) -> &FaceGrid {
        &self.faces[face.index()]
    }

    /// Letters of all 54 facelets, faces in scan order, each row-major.
    pub fn facelets(&self) -> String {
        self.faces
            .iter()
            .flat_map(|f| f.iter().map(|(_, _, c)| c.letter()))
            .collect()
    }

    /// Number of facelets per color. A solved-able scan has 9 of each.
    pub fn color_counts(&self) -> [(Color, usize); 7] {
        let mut counts = Color::ALL.map(|c| (c, 0));
        for face in &self.faces {
            for (_, _, c) in face.iter() {
                counts[c as usize].1 += 1;
            }
        }
        counts
    }
}

impl CubeState for ColorCube {
    fn set_color(&mut self, face: FaceId, row: usize, col: usize, color: Color) {
        self.faces[face.index()].set(row, col, color);
    }
}
