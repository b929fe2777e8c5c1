//! Scalar kinds and typed scalar values carried by keyframes and outputs.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Int,
    Float,
}

/// A keyframe or output value.
///
/// Deserializes untagged so that authoring data keeps the int/float typing of
/// the source document: `3` becomes `Int(3)`, `3.0` or `2.5` become `Float`.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Int(i32),
    Float(f32),
}

impl Scalar {
    #[inline]
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Int(_) => ScalarKind::Int,
            Scalar::Float(_) => ScalarKind::Float,
        }
    }

    /// Convert to the requested kind. Float to int truncates toward zero
    /// (saturating at the `i32` bounds, NaN maps to 0).
    #[inline]
    pub fn to_kind(self, kind: ScalarKind) -> Scalar {
        match kind {
            ScalarKind::Int => Scalar::Int(self.as_i32()),
            ScalarKind::Float => Scalar::Float(self.as_f32()),
        }
    }

    #[inline]
    pub fn as_i32(self) -> i32 {
        match self {
            Scalar::Int(i) => i,
            Scalar::Float(f) => f as i32,
        }
    }

    #[inline]
    pub fn as_f32(self) -> f32 {
        match self {
            Scalar::Int(i) => i as f32,
            Scalar::Float(f) => f,
        }
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(v)
    }
}

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Scalar::Float(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_to_int_truncates_toward_zero() {
        assert_eq!(Scalar::Float(2.9).to_kind(ScalarKind::Int), Scalar::Int(2));
        assert_eq!(Scalar::Float(-2.9).to_kind(ScalarKind::Int), Scalar::Int(-2));
        assert_eq!(Scalar::Float(f32::NAN).as_i32(), 0);
    }

    #[test]
    fn untagged_json_keeps_number_typing() {
        let parsed: Vec<Scalar> = serde_json::from_str("[3, 2.5, -1]").unwrap();
        assert_eq!(
            parsed,
            vec![Scalar::Int(3), Scalar::Float(2.5), Scalar::Int(-1)]
        );
    }
}
