//! Region combination operators.

use crate::error::RegionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How [`Region::combine`](crate::Region::combine) merges an operand into a
/// region.
///
/// Discriminants are stable and may be used as a compact wire value through
/// [`TryFrom<u8>`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum RegionOp {
    /// Remove the operand's area from the region.
    Difference = 0,
    /// Keep only the area covered by both.
    Intersect = 1,
    /// Add the operand's area; normalization is deferred to the next query.
    Union = 2,
    /// Add the operand's area and coalesce the result immediately.
    MinimalUnion = 3,
    /// Keep the area covered by exactly one of the two.
    Xor = 4,
    /// Replace the region with the operand minus the region.
    ReverseDifference = 5,
    /// Replace the region with the operand.
    Replace = 6,
}

impl RegionOp {
    /// Every operator, in discriminant order.
    pub const ALL: [Self; 7] = [
        Self::Difference,
        Self::Intersect,
        Self::Union,
        Self::MinimalUnion,
        Self::Xor,
        Self::ReverseDifference,
        Self::Replace,
    ];

    /// Snake-case name of the operator.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Difference => "difference",
            Self::Intersect => "intersect",
            Self::Union => "union",
            Self::MinimalUnion => "minimal_union",
            Self::Xor => "xor",
            Self::ReverseDifference => "reverse_difference",
            Self::Replace => "replace",
        }
    }

    /// Whether an empty operand leaves the region untouched.
    #[must_use]
    pub const fn empty_operand_is_identity(self) -> bool {
        matches!(
            self,
            Self::Difference | Self::Union | Self::MinimalUnion | Self::Xor
        )
    }
}

impl fmt::Display for RegionOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for RegionOp {
    type Error = RegionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(RegionError::InvalidOp(value))
    }
}

impl From<RegionOp> for u8 {
    fn from(op: RegionOp) -> Self {
        op as Self
    }
}

impl FromStr for RegionOp {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "difference" | "exclude" => Ok(Self::Difference),
            "intersect" => Ok(Self::Intersect),
            "union" => Ok(Self::Union),
            "minimalunion" => Ok(Self::MinimalUnion),
            "xor" => Ok(Self::Xor),
            "reversedifference" => Ok(Self::ReverseDifference),
            "replace" => Ok(Self::Replace),
            _ => Err(RegionError::UnknownOp(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminants_are_stable() {
        assert_eq!(u8::from(RegionOp::Difference), 0);
        assert_eq!(u8::from(RegionOp::Intersect), 1);
        assert_eq!(u8::from(RegionOp::Union), 2);
        assert_eq!(u8::from(RegionOp::MinimalUnion), 3);
        assert_eq!(u8::from(RegionOp::Xor), 4);
        assert_eq!(u8::from(RegionOp::ReverseDifference), 5);
        assert_eq!(u8::from(RegionOp::Replace), 6);
    }

    #[test]
    fn test_try_from_roundtrips_every_op() {
        for op in RegionOp::ALL {
            assert_eq!(RegionOp::try_from(u8::from(op)), Ok(op));
        }
    }

    #[test]
    fn test_try_from_rejects_unknown_discriminant() {
        assert_eq!(RegionOp::try_from(7), Err(RegionError::InvalidOp(7)));
        assert_eq!(RegionOp::try_from(255), Err(RegionError::InvalidOp(255)));
    }

    #[test]
    fn test_from_str_accepts_spellings() {
        assert_eq!("union".parse(), Ok(RegionOp::Union));
        assert_eq!("MinimalUnion".parse(), Ok(RegionOp::MinimalUnion));
        assert_eq!("minimal_union".parse(), Ok(RegionOp::MinimalUnion));
        assert_eq!("reverse-difference".parse(), Ok(RegionOp::ReverseDifference));
        assert_eq!(" XOR ".parse(), Ok(RegionOp::Xor));
        assert_eq!("exclude".parse(), Ok(RegionOp::Difference));
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "blend".parse::<RegionOp>().unwrap_err();
        assert_eq!(err, RegionError::UnknownOp("blend".to_string()));
    }

    #[test]
    fn test_display_matches_name() {
        for op in RegionOp::ALL {
            assert_eq!(op.to_string(), op.name());
            assert_eq!(op.name().parse(), Ok(op));
        }
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&RegionOp::MinimalUnion).expect("serialize");
        assert_eq!(json, "\"minimal_union\"");
        let op: RegionOp = serde_json::from_str("\"reverse_difference\"").expect("deserialize");
        assert_eq!(op, RegionOp::ReverseDifference);
    }

    #[test]
    fn test_empty_operand_identity() {
        assert!(RegionOp::Union.empty_operand_is_identity());
        assert!(RegionOp::Difference.empty_operand_is_identity());
        assert!(!RegionOp::Intersect.empty_operand_is_identity());
        assert!(!RegionOp::Replace.empty_operand_is_identity());
        assert!(!RegionOp::ReverseDifference.empty_operand_is_identity());
    }
}
