//! Trace line decoding.
//!
//! A trace line has the shape `ACTIVITY[, PARAM]`. EXEC lines name the program inside the
//! activity field: `EXEC program1, 50`. The decoder trims every token and rejects anything it
//! cannot interpret, since a half-understood trace would produce a meaningless log.

use std::fmt;

use crate::common::{SimError, SimResult};

/// The kinds of activity a trace can contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Activity {
    /// User-mode computation for `param` ticks.
    Cpu,
    /// System call serviced by the device whose delay index is `param`.
    Syscall,
    /// I/O completion from the device whose delay index is `param`.
    EndIo,
    /// Clone the running process; `param` is the cloning cost.
    Fork,
    /// Replace the running program; `param` is the sizing cost.
    Exec,
    /// Start of the parent branch after a FORK.
    IfParent,
    /// Start of the child branch after a FORK.
    IfChild,
    /// End of a FORK branch block.
    EndIf,
}

impl Activity {
    /// Maps a trimmed activity keyword to its kind.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "CPU" => Some(Self::Cpu),
            "SYSCALL" => Some(Self::Syscall),
            "END_IO" => Some(Self::EndIo),
            "FORK" => Some(Self::Fork),
            "EXEC" => Some(Self::Exec),
            "IF_PARENT" => Some(Self::IfParent),
            "IF_CHILD" => Some(Self::IfChild),
            "ENDIF" => Some(Self::EndIf),
            _ => None,
        }
    }

    /// The keyword as written in trace files.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::Syscall => "SYSCALL",
            Self::EndIo => "END_IO",
            Self::Fork => "FORK",
            Self::Exec => "EXEC",
            Self::IfParent => "IF_PARENT",
            Self::IfChild => "IF_CHILD",
            Self::EndIf => "ENDIF",
        }
    }

    /// Returns true for the branch markers that only structure FORK blocks.
    pub const fn is_marker(self) -> bool {
        matches!(self, Self::IfParent | Self::IfChild | Self::EndIf)
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One decoded trace record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceLine {
    /// Activity kind.
    pub activity: Activity,
    /// Numeric parameter; 0 when the line has none.
    pub param: u64,
    /// Program named by an EXEC line.
    pub program: Option<String>,
    /// The line as it appeared in the trace, used in status snapshots.
    pub raw: String,
}

impl TraceLine {
    /// Decodes one raw trace line.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownActivity`] for an unrecognized keyword,
    /// [`SimError::InvalidNumber`] for a parameter that is not an unsigned integer, and
    /// [`SimError::MissingProgramName`] for an EXEC without a program.
    ///
    /// # Examples
    ///
    /// ```
    /// use trapsim_core::trace::{Activity, TraceLine};
    ///
    /// let line = TraceLine::parse("EXEC program1, 50").unwrap();
    /// assert_eq!(line.activity, Activity::Exec);
    /// assert_eq!(line.param, 50);
    /// assert_eq!(line.program.as_deref(), Some("program1"));
    /// ```
    pub fn parse(raw: &str) -> SimResult<Self> {
        let mut fields = raw.split(',');
        let head = fields.next().unwrap_or_default().trim();
        let param = match fields.next() {
            Some(field) => {
                let field = field.trim();
                field
                    .parse::<u64>()
                    .map_err(|_| SimError::invalid_number(field, raw))?
            }
            None => 0,
        };

        let mut words = head.split_whitespace();
        let keyword = words.next().unwrap_or_default();
        let activity = Activity::from_keyword(keyword).ok_or_else(|| SimError::UnknownActivity {
            activity: head.to_string(),
            line: raw.to_string(),
        })?;

        let program = if activity == Activity::Exec {
            let name = words
                .next()
                .ok_or_else(|| SimError::MissingProgramName(raw.to_string()))?;
            Some(name.to_string())
        } else if words.next().is_some() {
            return Err(SimError::UnknownActivity {
                activity: head.to_string(),
                line: raw.to_string(),
            });
        } else {
            None
        };

        Ok(Self {
            activity,
            param,
            program,
            raw: raw.to_string(),
        })
    }
}

/// Decodes a whole trace, skipping blank lines.
///
/// # Errors
///
/// Propagates the first line that fails [`TraceLine::parse`].
pub fn parse_trace<'a, I>(lines: I) -> SimResult<Vec<TraceLine>>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .map(TraceLine::parse)
        .collect()
}
