//! Scramble generation for built-in and custom puzzle types.
//!
//! Most puzzles use the standard grammar: uniformly random moves from a fixed
//! alphabet, never turning the same face twice in a row, each followed by a
//! random modifier (`""`, `'`, `2`). Megaminx uses its own line-based grammar.
//! Every generator takes the RNG as a parameter; the `generate_*` shorthands
//! draw from the thread-local RNG.

use crate::config::{MEGAMINX_LINES, MEGAMINX_PAIRS_PER_LINE, MODIFIERS};
use crate::puzzle::{CubeType, CustomCubeType};
use log::{debug, warn};
use rand::seq::IndexedRandom;
use rand::Rng;
use rand_distr::{Bernoulli, Distribution};
use std::collections::HashSet;
use std::fmt;

const MOVES_2X2: &[&str] = &["R", "U", "F"];
const MOVES_3X3: &[&str] = &["U", "D", "L", "R", "F", "B"];
const MOVES_4X4: &[&str] = &[
    "U", "D", "L", "R", "F", "B", "Uw", "Dw", "Lw", "Rw", "Fw", "Bw",
];
const MOVES_5X5: &[&str] = &[
    "U", "D", "L", "R", "F", "B", "Uw", "Dw", "Lw", "Rw", "Fw", "Bw", "3Rw", "3Lw", "3Uw", "3Dw",
    "3Fw", "3Bw",
];
const MOVES_PYRAMINX: &[&str] = &["U", "L", "R", "B"];
const MOVES_SKEWB: &[&str] = &["U", "R", "L", "B"];
const MOVES_SQUARE1: &[&str] = &["U", "D", "L", "R", "Uw", "Dw"];

/// Alphabet and target length of a standard-grammar puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSet {
    pub moves: &'static [&'static str],
    pub length: usize,
}

const SET_3X3: MoveSet = MoveSet { moves: MOVES_3X3, length: 20 };

/// Standard-grammar move set for a puzzle, or `None` for Megaminx.
///
/// Puzzles without a dedicated set (6x6, 7x7, custom tags) get the 3x3 set.
pub fn move_set(cube_type: &CubeType) -> Option<MoveSet> {
    let set = match cube_type {
        CubeType::TwoByTwo => MoveSet { moves: MOVES_2X2, length: 9 },
        CubeType::ThreeByThree => SET_3X3,
        CubeType::FourByFour => MoveSet { moves: MOVES_4X4, length: 44 },
        CubeType::FiveByFive => MoveSet { moves: MOVES_5X5, length: 60 },
        CubeType::Pyraminx => MoveSet { moves: MOVES_PYRAMINX, length: 11 },
        CubeType::Skewb => MoveSet { moves: MOVES_SKEWB, length: 9 },
        CubeType::Square1 => MoveSet { moves: MOVES_SQUARE1, length: 18 },
        CubeType::Megaminx => return None,
        CubeType::SixBySix | CubeType::SevenBySeven | CubeType::Custom(_) => {
            debug!("No dedicated move set for {}, using 3x3", cube_type);
            SET_3X3
        }
    };
    Some(set)
}

// Errors for scrambles built from user-supplied alphabets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrambleError {
    /// The alphabet needs at least two faces, or no move could follow another.
    TooFewFaces(usize),
    ZeroLength,
}

impl fmt::Display for ScrambleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrambleError::TooFewFaces(faces) => write!(
                f,
                "Move alphabet must span at least 2 faces, found {}",
                faces
            ),
            ScrambleError::ZeroLength => write!(f, "Scramble length must be at least 1"),
        }
    }
}

impl std::error::Error for ScrambleError {}

/// Face a move turns: its first letter, so `R2`, `Rw` and `3Rw` all turn `R`.
pub fn face_of(mv: &str) -> Option<char> {
    mv.chars()
        .find(char::is_ascii_alphabetic)
        .or_else(|| mv.chars().next())
}

fn distinct_faces<M: AsRef<str>>(moves: &[M]) -> usize {
    moves
        .iter()
        .filter_map(|m| face_of(m.as_ref()))
        .collect::<HashSet<_>>()
        .len()
}

/// Draw a move whose face differs from `last_face`, plus a random modifier.
///
/// Callers guarantee the alphabet spans at least two faces, otherwise the
/// rejection loop would never terminate.
fn random_move<M: AsRef<str>, R: Rng + ?Sized>(
    moves: &[M],
    last_face: Option<char>,
    rng: &mut R,
) -> (String, Option<char>) {
    let (mv, face) = loop {
        let candidate = moves[rng.random_range(0..moves.len())].as_ref();
        let face = face_of(candidate);
        if face.is_none() || face != last_face {
            break (candidate, face);
        }
    };
    let modifier = MODIFIERS.choose(rng).copied().unwrap_or_default();
    (format!("{}{}", mv, modifier), face)
}

fn standard_scramble<M: AsRef<str>, R: Rng + ?Sized>(
    moves: &[M],
    length: usize,
    rng: &mut R,
) -> String {
    let mut scramble = Vec::with_capacity(length);
    let mut last_face = None;

    for _ in 0..length {
        let (token, face) = random_move(moves, last_face, rng);
        scramble.push(token);
        last_face = face;
    }

    scramble.join(" ")
}

fn megaminx_scramble<R: Rng + ?Sized>(rng: &mut R) -> String {
    let coin = Bernoulli::new(0.5).expect("0.5 is a valid probability");
    let mut lines = Vec::with_capacity(MEGAMINX_LINES);

    for _ in 0..MEGAMINX_LINES {
        let mut line = Vec::with_capacity(MEGAMINX_PAIRS_PER_LINE * 2 + 1);
        for _ in 0..MEGAMINX_PAIRS_PER_LINE {
            line.push(if coin.sample(rng) { "R++" } else { "R--" });
            line.push(if coin.sample(rng) { "D++" } else { "D--" });
        }
        line.push(if coin.sample(rng) { "U" } else { "U'" });
        lines.push(line.join(" "));
    }

    lines.join("\n")
}

/// Generate a scramble for `cube_type` with the given RNG.
pub fn generate_scramble_with<R: Rng + ?Sized>(cube_type: impl Into<CubeType>, rng: &mut R) -> String {
    let cube_type = cube_type.into();
    match move_set(&cube_type) {
        Some(set) => {
            debug_assert!(distinct_faces(set.moves) > 1);
            standard_scramble(set.moves, set.length, rng)
        }
        None => megaminx_scramble(rng),
    }
}

/// Generate a scramble for `cube_type` using the thread-local RNG.
pub fn generate_scramble(cube_type: impl Into<CubeType>) -> String {
    generate_scramble_with(cube_type, &mut rand::rng())
}

/// Generate a standard-grammar scramble from a custom puzzle's own alphabet.
pub fn generate_custom_scramble_with<R: Rng + ?Sized>(
    custom: &CustomCubeType,
    rng: &mut R,
) -> Result<String, ScrambleError> {
    let moves: Vec<&str> = custom
        .moves
        .iter()
        .map(|m| m.trim())
        .filter(|m| !m.is_empty())
        .collect();

    let faces = distinct_faces(&moves);
    if faces < 2 {
        warn!(
            "Custom puzzle '{}' has {} distinct face(s), cannot scramble",
            custom.type_name, faces
        );
        return Err(ScrambleError::TooFewFaces(faces));
    }
    if custom.scramble_length == 0 {
        return Err(ScrambleError::ZeroLength);
    }

    Ok(standard_scramble(&moves, custom.scramble_length, rng))
}

pub fn generate_custom_scramble(custom: &CustomCubeType) -> Result<String, ScrambleError> {
    generate_custom_scramble_with(custom, &mut rand::rng())
}
