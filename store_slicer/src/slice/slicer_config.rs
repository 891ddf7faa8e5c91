// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Configure a [`crate::StoreConnector`].
///
/// - `pending_limit`: how many actions can wait for a store to be connected. `None`
///   (the default) means there is no limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlicerConfig {
    pub pending_limit: Option<usize>,
}

impl SlicerConfig {
    #[must_use]
    pub fn with_pending_limit(mut self, pending_limit: usize) -> Self {
        self.pending_limit = Some(pending_limit);
        self
    }
}

impl From<usize> for SlicerConfig {
    fn from(pending_limit: usize) -> Self {
        Self {
            pending_limit: Some(pending_limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        assert_eq!(SlicerConfig::default().pending_limit, None);
    }

    #[test]
    fn test_pending_limit() {
        assert_eq!(SlicerConfig::default().with_pending_limit(3), SlicerConfig::from(3));
    }
}
