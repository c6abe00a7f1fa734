//! Shape definitions for the seven tetrominoes.
//!
//! Every kind owns an ordered list of 4x4 rotation frames, indexed
//! `[row][column]` with row 0 at the top of the box. Rotating a piece steps
//! forward through the list, wrapping at [`rotation_count`].

use once_cell::sync::Lazy;

/// One rotation frame: `true` marks a solid cell.
pub type Frame = [[bool; 4]; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Square,
    Line,
    L,
    J,
    T,
    S,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::Square,
        PieceKind::Line,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
    ];

    #[must_use]
    pub fn random() -> Self {
        Self::ALL[fastrand::usize(..Self::ALL.len())]
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Square => "Square",
            PieceKind::Line => "Line",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
        }
    }

    fn index(self) -> usize {
        match self {
            PieceKind::Square => 0,
            PieceKind::Line => 1,
            PieceKind::L => 2,
            PieceKind::J => 3,
            PieceKind::T => 4,
            PieceKind::S => 5,
            PieceKind::Z => 6,
        }
    }
}

const O: bool = false;
const X: bool = true;

const SQUARE: [Frame; 1] = [[
    [O, O, O, O],
    [O, X, X, O],
    [O, X, X, O],
    [O, O, O, O],
]];

const LINE: [Frame; 2] = [
    [
        [O, O, O, O],
        [O, O, O, O],
        [X, X, X, X],
        [O, O, O, O],
    ],
    [
        [O, X, O, O],
        [O, X, O, O],
        [O, X, O, O],
        [O, X, O, O],
    ],
];

const L: [Frame; 4] = [
    [
        [O, O, O, O],
        [O, O, O, X],
        [O, X, X, X],
        [O, O, O, O],
    ],
    [
        [O, O, O, O],
        [O, O, X, O],
        [O, O, X, O],
        [O, O, X, X],
    ],
    [
        [O, O, O, O],
        [O, O, O, O],
        [O, X, X, X],
        [O, X, O, O],
    ],
    [
        [O, O, O, O],
        [O, X, X, O],
        [O, O, X, O],
        [O, O, X, O],
    ],
];

const J: [Frame; 4] = [
    [
        [O, O, O, O],
        [O, X, O, O],
        [O, X, X, X],
        [O, O, O, O],
    ],
    [
        [O, O, O, O],
        [O, O, X, X],
        [O, O, X, O],
        [O, O, X, O],
    ],
    [
        [O, O, O, O],
        [O, O, O, O],
        [O, X, X, X],
        [O, O, O, X],
    ],
    [
        [O, O, O, O],
        [O, O, X, O],
        [O, O, X, O],
        [O, X, X, O],
    ],
];

const T: [Frame; 4] = [
    [
        [O, O, O, O],
        [O, O, X, O],
        [O, X, X, X],
        [O, O, O, O],
    ],
    [
        [O, O, O, O],
        [O, O, X, O],
        [O, O, X, X],
        [O, O, X, O],
    ],
    [
        [O, O, O, O],
        [O, O, O, O],
        [O, X, X, X],
        [O, O, X, O],
    ],
    [
        [O, O, O, O],
        [O, O, X, O],
        [O, X, X, O],
        [O, O, X, O],
    ],
];

const S: [Frame; 2] = [
    [
        [O, O, O, O],
        [O, O, X, X],
        [O, X, X, O],
        [O, O, O, O],
    ],
    [
        [O, O, O, O],
        [O, X, O, O],
        [O, X, X, O],
        [O, O, X, O],
    ],
];

const Z: [Frame; 2] = [
    [
        [O, O, O, O],
        [O, X, X, O],
        [O, O, X, X],
        [O, O, O, O],
    ],
    [
        [O, O, O, O],
        [O, O, X, O],
        [O, X, X, O],
        [O, X, O, O],
    ],
];

/// Solid cells of a frame as `(column, row)` offsets inside the 4x4 box.
pub type Cells = [(i32, i32); 4];

// Offsets are derived once from the bitmaps and shared by every piece.
static CELLS: Lazy<[Vec<Cells>; 7]> = Lazy::new(|| {
    PieceKind::ALL.map(|kind| frames(kind).iter().map(frame_cells).collect())
});

fn frame_cells(frame: &Frame) -> Cells {
    let mut cells = [(0, 0); 4];
    let mut count = 0;
    for (row, line) in frame.iter().enumerate() {
        for (col, &solid) in line.iter().enumerate() {
            if solid {
                cells[count] = (col as i32, row as i32);
                count += 1;
            }
        }
    }
    debug_assert_eq!(count, 4, "every tetromino frame has four cells");
    cells
}

/// Rotation frames for `kind`, in rotation order.
#[must_use]
pub fn frames(kind: PieceKind) -> &'static [Frame] {
    match kind {
        PieceKind::Square => &SQUARE,
        PieceKind::Line => &LINE,
        PieceKind::L => &L,
        PieceKind::J => &J,
        PieceKind::T => &T,
        PieceKind::S => &S,
        PieceKind::Z => &Z,
    }
}

#[must_use]
pub fn frame_count(kind: PieceKind) -> usize {
    frames(kind).len()
}

/// Number of usable rotations. Zero means the piece never rotates.
#[must_use]
pub fn rotation_count(kind: PieceKind) -> usize {
    match kind {
        PieceKind::Square => 0,
        _ => frame_count(kind),
    }
}

/// Occupied offsets of one frame. `rotation` wraps at the frame count.
#[must_use]
pub fn cells(kind: PieceKind, rotation: usize) -> &'static Cells {
    let table = &CELLS[kind.index()];
    &table[rotation % table.len()]
}
