//! FORK branch block extraction.
//!
//! After a FORK, the trace describes both sides of the fork in one block:
//!
//! ```text
//! FORK, 10
//! IF_CHILD, 0
//!     ...child-only lines...
//! IF_PARENT, 0
//!     ...parent-only lines...
//! ENDIF, 0
//! ...lines run by the parent after the child finished...
//! ```
//!
//! The child body is handed to a recursive simulation; the outer walk skips it and resumes at the
//! parent branch. A nested block inside a child body opens with its own `IF_CHILD`; a depth counter
//! keeps the nested `IF_PARENT`/`ENDIF` from closing the outer block.

use super::parser::{Activity, TraceLine};

/// A child body cut out of a trace, and where the parent continues.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildBlock {
    /// Lines the child executes.
    pub body: Vec<TraceLine>,
    /// Index of the first trace line the parent executes after the child finishes.
    pub resume_at: usize,
}

/// Extracts the child body of the FORK at `fork_index`.
///
/// The body opens after the first `IF_CHILD` (or `ENDIF`, whichever comes first) and closes at
/// the next depth-0 `IF_PARENT` or `ENDIF`. Lines between the FORK and the opening marker belong
/// to the block and are skipped by the parent. Without an opening marker the body is empty and the
/// parent resumes right after the FORK; without a closing marker the body runs to the end of the
/// trace.
///
/// # Examples
///
/// ```
/// use trapsim_core::trace::{extract_child_block, parse_trace};
///
/// let trace = parse_trace([
///     "FORK, 10", "IF_CHILD, 0", "CPU, 5", "IF_PARENT, 0", "CPU, 7", "ENDIF, 0",
/// ]).unwrap();
/// let block = extract_child_block(&trace, 0);
/// assert_eq!(block.body.len(), 1);
/// assert_eq!(block.body[0].param, 5);
/// assert_eq!(block.resume_at, 4);
/// ```
pub fn extract_child_block(trace: &[TraceLine], fork_index: usize) -> ChildBlock {
    let start = fork_index + 1;
    let Some(open) = trace
        .iter()
        .skip(start)
        .position(|l| matches!(l.activity, Activity::IfChild | Activity::EndIf))
        .map(|offset| start + offset)
    else {
        return ChildBlock {
            body: Vec::new(),
            resume_at: start.min(trace.len()),
        };
    };

    let mut depth = 0usize;
    let mut close = trace.len();
    for (index, line) in trace.iter().enumerate().skip(open + 1) {
        match line.activity {
            Activity::IfChild => depth += 1,
            Activity::IfParent | Activity::EndIf if depth == 0 => {
                close = index;
                break;
            }
            Activity::EndIf => depth -= 1,
            _ => {}
        }
    }

    ChildBlock {
        body: trace[open + 1..close].to_vec(),
        resume_at: (close + 1).min(trace.len()),
    }
}
