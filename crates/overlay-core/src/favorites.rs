/// Favorite emote names in the order they were added.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Favorites {
    names: Vec<String>,
}

impl Favorites {
    pub fn new(names: Vec<String>) -> Self {
        let mut out = Self::default();
        for n in names {
            if !out.contains(&n) {
                out.names.push(n);
            }
        }
        out
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Add or remove `name`. Returns true when it is now a favorite.
    pub fn toggle(&mut self, name: &str) -> bool {
        if let Some(pos) = self.names.iter().position(|n| n == name) {
            self.names.remove(pos);
            false
        } else {
            self.names.push(name.to_string());
            true
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
