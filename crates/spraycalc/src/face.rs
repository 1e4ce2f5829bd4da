use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the six sprayable sides of a rectangular panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Front,
    Back,
    Top,
    Bottom,
    Left,
    Right,
}

impl Face {
    /// Every face in canonical order.
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Top,
        Face::Bottom,
        Face::Left,
        Face::Right,
    ];

    /// Lowercase token shared with picker adapters.
    pub fn token(self) -> &'static str {
        match self {
            Face::Front => "front",
            Face::Back => "back",
            Face::Top => "top",
            Face::Bottom => "bottom",
            Face::Left => "left",
            Face::Right => "right",
        }
    }

    /// Capitalized name for display.
    pub fn label(self) -> &'static str {
        match self {
            Face::Front => "Front",
            Face::Back => "Back",
            Face::Top => "Top",
            Face::Bottom => "Bottom",
            Face::Left => "Left",
            Face::Right => "Right",
        }
    }

    pub fn initial(self) -> char {
        self.label().chars().next().unwrap_or('?')
    }

    fn index(self) -> usize {
        match self {
            Face::Front => 0,
            Face::Back => 1,
            Face::Top => 2,
            Face::Bottom => 3,
            Face::Left => 4,
            Face::Right => 5,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A face token outside the six-name vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown face `{0}`")]
pub struct UnknownFace(pub String);

impl FromStr for Face {
    type Err = UnknownFace;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Face::ALL
            .into_iter()
            .find(|face| face.token() == s)
            .ok_or_else(|| UnknownFace(s.to_string()))
    }
}

/// Selection flags for all six faces.
///
/// The set always carries exactly six entries; faces can only be toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceSet {
    flags: [bool; 6],
}

impl Default for FaceSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FaceSet {
    /// The starting selection: front only.
    pub fn new() -> Self {
        let mut flags = [false; 6];
        flags[Face::Front.index()] = true;
        Self { flags }
    }

    pub fn empty() -> Self {
        Self { flags: [false; 6] }
    }

    /// Build a set with exactly the given faces selected.
    pub fn from_faces<I: IntoIterator<Item = Face>>(faces: I) -> Self {
        let mut set = Self::empty();
        for face in faces {
            set.set(face, true);
        }
        set
    }

    pub fn is_selected(&self, face: Face) -> bool {
        self.flags[face.index()]
    }

    pub fn set(&mut self, face: Face, selected: bool) {
        self.flags[face.index()] = selected;
    }

    /// Flip the flag for `face`, returning the new state.
    pub fn toggle(&mut self, face: Face) -> bool {
        let slot = &mut self.flags[face.index()];
        *slot = !*slot;
        *slot
    }

    /// Restore the starting selection.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Selected faces in canonical order.
    pub fn selected(&self) -> Vec<Face> {
        Face::ALL
            .into_iter()
            .filter(|face| self.is_selected(*face))
            .collect()
    }

    pub fn count(&self) -> usize {
        self.flags.iter().filter(|flag| **flag).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Human-readable list such as `Front, Top`, or `None` when nothing is selected.
    pub fn label(&self) -> String {
        let names: Vec<&str> = self.selected().into_iter().map(Face::label).collect();
        if names.is_empty() {
            "None".to_string()
        } else {
            names.join(", ")
        }
    }
}
