//! Ordered flag accumulation and command-line serialization.
//!
//! The archiver accepts three switch shapes that are never interchangeable:
//! bare switches (`-y`), equals-valued switches (`-mx=9`), and glued switches
//! whose value follows the name with no separator (`-ooutdir`). [`FlagSet`]
//! covers the first two; glued switches are composed as literal tokens by the
//! pipeline because their spelling is positional, not key-based.

/// An insertion-ordered set of archiver switches.
///
/// Keys are switch names without the leading dash; a `None` value means the
/// switch is presence-only. Re-inserting an existing key overwrites its value
/// in place (last-write-wins) without disturbing insertion order, which is
/// also the serialization order.
///
/// Keys that parse as integers are positional placeholders: on serialization
/// the key is discarded and the value alone becomes the switch name. This is
/// how pre-spelled tokens such as filter switches (`-ir!*.txt`) ride along in
/// the ordered set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    entries: Vec<(String, Option<String>)>,
}

impl FlagSet {
    /// Creates an empty flag set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a switch, overwriting the value if the name is already present.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Inserts a presence-only switch.
    pub fn insert_bare(&mut self, name: impl Into<String>) {
        self.insert(name, None);
    }

    /// Removes a switch by name. Unknown names are a no-op.
    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(n, _)| n != name);
    }

    /// Returns the value of a switch: `None` if absent, `Some(None)` if
    /// present without a value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_deref())
    }

    /// Whether the set contains the named switch.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of switches in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }

    /// Merges another set into this one, entry by entry, last-write-wins.
    pub fn extend_from(&mut self, other: &Self) {
        for (name, value) in &other.entries {
            self.insert(name.clone(), value.clone());
        }
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Serializes the set into command-line tokens.
    ///
    /// `("a", None)` becomes `-a`; `("b", Some("v"))` becomes `-b=v`. A key
    /// that parses as an integer is dropped and its value becomes the whole
    /// switch name; such an entry with no value produces no token. Switch
    /// legality is not checked here: the external binary is the oracle.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            if name.parse::<u64>().is_ok() {
                if let Some(v) = value {
                    args.push(format!("-{v}"));
                }
            } else if let Some(v) = value {
                args.push(format!("-{name}={v}"));
            } else {
                args.push(format!("-{name}"));
            }
        }
        args
    }
}

impl<S: Into<String>> FromIterator<(S, Option<String>)> for FlagSet {
    fn from_iter<T: IntoIterator<Item = (S, Option<String>)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}
