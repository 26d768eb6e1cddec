//! Value cell that remembers whether its last write changed it

/// Holds a value plus a flag telling whether the most recent assignment
/// replaced it with a different one.
#[derive(Debug, Clone)]
pub struct ChangeCell<T> {
    value: T,
    changed: bool,
}

impl<T: PartialEq> ChangeCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            changed: false,
        }
    }

    /// Cell whose first check reports a change even though nothing was written yet
    pub fn changed(value: T) -> Self {
        Self {
            value,
            changed: true,
        }
    }

    /// Assign a value; the flag is set iff it differs from the held one.
    /// Returns the new flag.
    pub fn set(&mut self, value: T) -> bool {
        if value != self.value {
            self.value = value;
            self.changed = true;
        } else {
            self.changed = false;
        }
        self.changed
    }

    /// Flag of the most recent write
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn get(&self) -> &T {
        &self.value
    }
}

impl<T: PartialEq + Default> Default for ChangeCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
