use crate::EditorError;
use std::{fmt, str::FromStr};
use strum::VariantArray as _;
use strum_macros::VariantArray;

const BLUR: &str = "blur";
const SHARPEN: &str = "sharpen";
const EDGE_DETECTION: &str = "edge_detection";

/// The operations an [`Editor`](crate::Editor) can apply.
#[derive(VariantArray, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    Blur,
    Sharpen,
    EdgeDetection,
}

impl Operation {
    pub fn all() -> Vec<Self> {
        Operation::VARIANTS.to_vec()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blur => BLUR,
            Self::Sharpen => SHARPEN,
            Self::EdgeDetection => EDGE_DETECTION,
        }
    }

    pub fn try_from_name(name: &str) -> Option<Self> {
        match name.trim() {
            BLUR => Some(Self::Blur),
            SHARPEN => Some(Self::Sharpen),
            EDGE_DETECTION => Some(Self::EdgeDetection),
            _ => None,
        }
    }

    /// `"blur, sharpen, edge_detection"`
    pub fn names() -> String {
        Operation::VARIANTS
            .iter()
            .map(|op| op.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = EditorError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::try_from_name(name).ok_or_else(|| EditorError::InvalidOperation(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for op in Operation::all() {
            assert_eq!(op.as_str().parse::<Operation>().unwrap(), op);
            assert_eq!(op.to_string(), op.as_str());
        }
        assert_eq!(Operation::names(), "blur, sharpen, edge_detection");
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(
            " edge_detection\n".parse::<Operation>().unwrap(),
            Operation::EdgeDetection
        );
    }

    #[test]
    fn test_unknown_names() {
        for name in ["", "Blur", "edge-detection", "emboss"] {
            match name.parse::<Operation>() {
                Err(EditorError::InvalidOperation(n)) => assert_eq!(n, name),
                other => panic!("unexpected {other:?}"),
            }
        }
    }
}
