/// Whether pointer movement may reposition the split.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SplitLock {
    #[default]
    Unlocked,
    Locked,
}

impl SplitLock {
    pub fn is_locked(self) -> bool {
        self == Self::Locked
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Unlocked => Self::Locked,
            Self::Locked => Self::Unlocked,
        }
    }

    /// Whether an update may proceed. Lock-overriding updates always may.
    pub fn permits(self, ignore_lock: bool) -> bool {
        ignore_lock || !self.is_locked()
    }
}

impl std::fmt::Display for SplitLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unlocked => write!(f, "Unlocked"),
            Self::Locked => write!(f, "Locked"),
        }
    }
}
