use serde::{Deserialize, Serialize};

/// A stored item. `id` is assigned by the store and never reused.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub description: String,
}

/// 创建输入：不包含 id，由存储分配
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: String,
}

/// Partial update. `None` keeps the current value.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ItemChanges {
    pub fn apply(self, item: &mut Item) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
    }
}

/// A full replacement expressed as a change set touching every field.
impl From<NewItem> for ItemChanges {
    fn from(input: NewItem) -> Self {
        Self { name: Some(input.name), description: Some(input.description) }
    }
}

/// The two records every freshly started service holds.
pub fn seed_items() -> Vec<Item> {
    (1..=2)
        .map(|n| Item {
            id: n,
            name: format!("Item {n}"),
            description: format!("This is item {n}"),
        })
        .collect()
}
