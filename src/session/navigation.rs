//! Navigation detection for single-page hosts.

/// Turns successive page addresses into a "navigation changed" signal.
///
/// Hosts that only learn about navigation by observing the page (rather
/// than from a router event) feed the current address in whenever the
/// page mutates.
#[derive(Debug, Clone, Default)]
pub struct NavigationWatcher {
    current: Option<String>,
}

impl NavigationWatcher {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            current: Some(initial.into()),
        }
    }

    /// Record `address`; true when it differs from the last one seen.
    ///
    /// The first observation on an empty watcher is not a navigation.
    pub fn observe(&mut self, address: &str) -> bool {
        match &self.current {
            Some(current) if current == address => false,
            Some(_) => {
                self.current = Some(address.to_string());
                true
            }
            None => {
                self.current = Some(address.to_string());
                false
            }
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}
