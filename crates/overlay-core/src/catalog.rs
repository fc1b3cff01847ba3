//! Emote catalog: category listing, selection and search filtering.

use crate::constants::CATEGORY_ORDER;
use crate::favorites::Favorites;
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const ALL: &str = "All";
pub const FAVORITES: &str = "Favorites";
pub const WALKS: &str = "Walks";
pub const EXPRESSIONS: &str = "Expressions";
pub const SHARED: &str = "Shared";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Emote {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "canPosition", default)]
    pub can_position: bool,
}

impl Emote {
    /// Chat command that plays this emote.
    pub fn command(&self) -> String {
        match self.category.as_str() {
            WALKS => format!("/walk {}", self.name),
            EXPRESSIONS => format!("/expression {}", self.name),
            _ => format!("/e {}", self.name),
        }
    }

    /// Positioning is offered for positionable emotes outside walk,
    /// expression and shared categories.
    pub fn offers_positioning(&self) -> bool {
        self.can_position && !matches!(self.category.as_str(), WALKS | EXPRESSIONS | SHARED)
    }

    /// Walks and expressions cannot be bound to quick slots.
    pub fn offers_keybinds(&self) -> bool {
        !matches!(self.category.as_str(), WALKS | EXPRESSIONS)
    }

    fn matches(&self, needle_lower: &str) -> bool {
        self.label.to_lowercase().contains(needle_lower)
            || self.name.to_lowercase().contains(needle_lower)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selection {
    All,
    Favorites,
    Category(String),
}

impl Selection {
    pub fn key(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Favorites => FAVORITES,
            Selection::Category(c) => c,
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            ALL => Selection::All,
            FAVORITES => Selection::Favorites,
            other => Selection::Category(other.to_string()),
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Selection::All
    }
}

/// One sidebar row.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryEntry {
    pub selection: Selection,
    pub count: usize,
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    all: Vec<Emote>,
    categories: FnvHashMap<String, Vec<Emote>>,
}

impl Catalog {
    pub fn new(all: Vec<Emote>, categories: FnvHashMap<String, Vec<Emote>>) -> Self {
        Self { all, categories }
    }

    pub fn find(&self, name: &str) -> Option<&Emote> {
        self.all.iter().find(|e| e.name == name)
    }

    pub fn favorite_emotes<'a>(&'a self, favorites: &'a Favorites) -> impl Iterator<Item = &'a Emote> {
        self.all.iter().filter(move |e| favorites.contains(&e.name))
    }

    /// Named categories: fixed order first, the rest alphabetically.
    pub fn sorted_category_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.categories.keys().map(String::as_str).collect();
        keys.sort_by(|a, b| compare_categories(a, b));
        keys
    }

    /// Sidebar rows: `All`, `Favorites` when non-empty, then every non-empty
    /// named category.
    pub fn entries(&self, favorites: &Favorites) -> Vec<CategoryEntry> {
        let mut out = vec![CategoryEntry {
            selection: Selection::All,
            count: self.all.len(),
        }];
        let fav_count = self.favorite_emotes(favorites).count();
        if fav_count > 0 {
            out.push(CategoryEntry {
                selection: Selection::Favorites,
                count: fav_count,
            });
        }
        for key in self.sorted_category_keys() {
            let count = self.categories.get(key).map_or(0, Vec::len);
            if count > 0 {
                out.push(CategoryEntry {
                    selection: Selection::Category(key.to_string()),
                    count,
                });
            }
        }
        out
    }

    /// Emotes for `selection`, narrowed by a case-insensitive search term.
    pub fn filter<'a>(
        &'a self,
        selection: &Selection,
        search: &str,
        favorites: &'a Favorites,
    ) -> Vec<&'a Emote> {
        let source: Vec<&Emote> = match selection {
            Selection::All => self.all.iter().collect(),
            Selection::Favorites => self.favorite_emotes(favorites).collect(),
            Selection::Category(c) => self
                .categories
                .get(c)
                .map(|v| v.iter().collect())
                .unwrap_or_default(),
        };
        if search.is_empty() {
            return source;
        }
        let needle = search.to_lowercase();
        source.into_iter().filter(|e| e.matches(&needle)).collect()
    }
}

fn compare_categories(a: &str, b: &str) -> Ordering {
    let ia = CATEGORY_ORDER.iter().position(|c| *c == a);
    let ib = CATEGORY_ORDER.iter().position(|c| *c == b);
    match (ia, ib) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
