use grid_util::point::Point;
use thiserror::Error;

use crate::graph::{EdgeId, NodeId};

/// Errors reported at the boundary of the crate: construction, graph edits and
/// search entry. Not finding a path is not an error, see [PathType](crate::PathType).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathfindingError {
    #[error("argument {name} is {value} but should be {expected}")]
    InvalidArgument {
        name: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("node {0:?} does not belong to this graph")]
    UnknownNode(NodeId),

    #[error("edge {0:?} does not belong to this graph")]
    UnknownEdge(EdgeId),

    #[error("position ({}, {}) is outside of the {columns}x{rows} grid", .position.x, .position.y)]
    OutOfBounds {
        position: Point,
        columns: usize,
        rows: usize,
    },

    #[error("step {index} from ({}, {}) to ({}, {}) is not a permitted movement", .from.x, .from.y, .to.x, .to.y)]
    IllegalStep { index: usize, from: Point, to: Point },
}

pub type Result<T> = std::result::Result<T, PathfindingError>;

impl PathfindingError {
    pub(crate) fn invalid(
        name: &'static str,
        value: impl ToString,
        expected: &'static str,
    ) -> PathfindingError {
        PathfindingError::InvalidArgument {
            name,
            value: value.to_string(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_argument() {
        let err = PathfindingError::invalid("columns", 0, ">= 1");
        assert_eq!(err.to_string(), "argument columns is 0 but should be >= 1");

        let err = PathfindingError::OutOfBounds {
            position: Point::new(3, -1),
            columns: 2,
            rows: 2,
        };
        assert_eq!(err.to_string(), "position (3, -1) is outside of the 2x2 grid");
    }
}
