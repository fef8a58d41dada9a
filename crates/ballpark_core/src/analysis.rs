//! Analysis tool selection
//!
//! The user picks which analysis behaviour newly created pointer tools get.
//! The selection is plain state handed to the router on every dispatch.

use serde::{Serialize, Deserialize};
use crate::locator::{ClippingPlaneLocator, LocatorContext, ToolLocator};
use crate::tool::ToolKey;

/// The analysis behaviours a pointer tool can be bound to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisTool {
    /// Movable clipping plane
    #[default]
    ClippingPlane,
}

impl AnalysisTool {
    /// Every mode, in menu order
    pub const ALL: [AnalysisTool; 1] = [AnalysisTool::ClippingPlane];

    /// Look up a mode by its menu index
    pub fn from_index(index: i32) -> Result<Self, AnalysisToolError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(AnalysisToolError::UnknownMode(index))
    }

    /// Menu index of this mode
    pub fn index(self) -> i32 {
        match self {
            AnalysisTool::ClippingPlane => 0,
        }
    }

    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            AnalysisTool::ClippingPlane => "Clipping Plane",
        }
    }

    /// Build the locator this mode binds to `tool`
    pub fn create_locator(
        self,
        tool: ToolKey,
        ctx: &mut LocatorContext<'_>,
    ) -> Box<dyn ToolLocator> {
        match self {
            AnalysisTool::ClippingPlane => Box::new(ClippingPlaneLocator::new(tool, ctx)),
        }
    }
}

impl std::fmt::Display for AnalysisTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error selecting an analysis tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisToolError {
    /// No mode has this menu index
    UnknownMode(i32),
}

impl std::fmt::Display for AnalysisToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisToolError::UnknownMode(i) => write!(f, "Unknown analysis tool index: {}", i),
        }
    }
}

impl std::error::Error for AnalysisToolError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for tool in AnalysisTool::ALL {
            assert_eq!(AnalysisTool::from_index(tool.index()), Ok(tool));
        }
    }

    #[test]
    fn test_unknown_index() {
        assert_eq!(AnalysisTool::from_index(1), Err(AnalysisToolError::UnknownMode(1)));
        assert_eq!(AnalysisTool::from_index(-1), Err(AnalysisToolError::UnknownMode(-1)));
    }

    #[test]
    fn test_default_is_clipping_plane() {
        assert_eq!(AnalysisTool::default(), AnalysisTool::ClippingPlane);
        assert_eq!(AnalysisTool::ClippingPlane.to_string(), "Clipping Plane");
    }

    #[test]
    fn test_error_display() {
        let msg = format!("{}", AnalysisToolError::UnknownMode(7));
        assert!(msg.contains("7"));
    }
}
