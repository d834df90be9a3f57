#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of executing a task for one tick.
///
/// `Running` means the task has not finished and expects to be executed again
/// on a later tick; composites remember where it happened so they can resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TaskStatus {
    Success,
    Failure,
    Running,
}

impl TaskStatus {
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, TaskStatus::Success)
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, TaskStatus::Failure)
    }

    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, TaskStatus::Running)
    }

    /// `true` for `Success` and `Failure`.
    #[inline]
    pub fn is_done(self) -> bool {
        !self.is_running()
    }

    /// Swaps `Success` and `Failure`. `Running` is left untouched.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            TaskStatus::Success => TaskStatus::Failure,
            TaskStatus::Failure => TaskStatus::Success,
            TaskStatus::Running => TaskStatus::Running,
        }
    }
}

impl From<bool> for TaskStatus {
    fn from(value: bool) -> Self {
        if value {
            TaskStatus::Success
        } else {
            TaskStatus::Failure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invert_keeps_running() {
        assert_eq!(TaskStatus::Success.invert(), TaskStatus::Failure);
        assert_eq!(TaskStatus::Failure.invert(), TaskStatus::Success);
        assert_eq!(TaskStatus::Running.invert(), TaskStatus::Running);
    }

    #[test]
    fn done_excludes_running() {
        assert!(TaskStatus::Success.is_done());
        assert!(TaskStatus::Failure.is_done());
        assert!(!TaskStatus::Running.is_done());
    }

    #[test]
    fn from_bool() {
        assert_eq!(TaskStatus::from(true), TaskStatus::Success);
        assert_eq!(TaskStatus::from(false), TaskStatus::Failure);
    }
}
