//! # Items
//!
//! Checkable, quantified entries of a list. Items carry an explicit
//! `sort_order`; a reorder request is validated into a [`ReorderPlan`]
//! against the ids the list actually holds before any position is written.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::{ItemId, ListId};
use crate::MAX_TEXT_LEN;

/// Quantity given to an item created without one.
pub const DEFAULT_QUANTITY: i32 = 1;

/// A stored item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ItemRecord {
    pub id: ItemId,
    pub list_id: ListId,
    pub label: String,
    pub quantity: i32,
    pub checked: bool,
    pub sort_order: i32,
}

/// Validated fields for a new item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub label: String,
    pub quantity: i32,
}

impl NewItem {
    pub fn new(label: Option<&str>, quantity: Option<i64>) -> Result<Self, ValidationError> {
        Ok(Self {
            label: validate_label(label.unwrap_or_default())?,
            quantity: quantity.map(validate_quantity).transpose()?.unwrap_or(DEFAULT_QUANTITY),
        })
    }
}

/// A validated, non-empty partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub checked: Option<bool>,
    pub quantity: Option<i32>,
    pub label: Option<String>,
}

impl ItemPatch {
    /// Validate the supplied fields. At least one must be present.
    pub fn new(
        checked: Option<bool>,
        quantity: Option<i64>,
        label: Option<&str>,
    ) -> Result<Self, ValidationError> {
        if checked.is_none() && quantity.is_none() && label.is_none() {
            return Err(ValidationError::EmptyPatch);
        }
        Ok(Self {
            checked,
            quantity: quantity.map(validate_quantity).transpose()?,
            label: label.map(validate_label).transpose()?,
        })
    }

    /// Apply the patch; fields not present are left untouched.
    pub fn apply(&self, item: &mut ItemRecord) {
        if let Some(checked) = self.checked {
            item.checked = checked;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(label) = &self.label {
            item.label = label.clone();
        }
    }
}

fn validate_label(raw: &str) -> Result<String, ValidationError> {
    let label = raw.trim();
    if label.is_empty() {
        return Err(ValidationError::LabelRequired);
    }
    if label.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: "Label",
            max: MAX_TEXT_LEN,
        });
    }
    Ok(label.to_string())
}

fn validate_quantity(raw: i64) -> Result<i32, ValidationError> {
    if raw < 1 {
        return Err(ValidationError::QuantityTooSmall(raw));
    }
    i32::try_from(raw).map_err(|_| ValidationError::QuantityTooLarge(raw))
}

/// Display order within a list: `sort_order`, then id.
pub fn display_order(a: &ItemRecord, b: &ItemRecord) -> Ordering {
    a.sort_order.cmp(&b.sort_order).then_with(|| a.id.cmp(&b.id))
}

/// A checked reorder request: a permutation of a list's item ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderPlan {
    order: Vec<ItemId>,
}

impl ReorderPlan {
    /// Validate `requested` against the ids currently in the list.
    ///
    /// The request must name every current item exactly once.
    pub fn new(current: &[ItemId], requested: &[ItemId]) -> Result<Self, ValidationError> {
        let known: HashSet<ItemId> = current.iter().copied().collect();
        let mut seen = HashSet::with_capacity(requested.len());
        for id in requested {
            if !known.contains(id) {
                return Err(ValidationError::UnknownItem(*id));
            }
            if !seen.insert(*id) {
                return Err(ValidationError::DuplicateItem(*id));
            }
        }
        if seen.len() != known.len() {
            return Err(ValidationError::IncompleteOrder {
                given: seen.len(),
                expected: known.len(),
            });
        }
        Ok(Self {
            order: requested.to_vec(),
        })
    }

    /// `(item, new sort_order)` pairs, positions counting from zero.
    pub fn positions(&self) -> impl Iterator<Item = (ItemId, i32)> + '_ {
        self.order.iter().zip(0..).map(|(id, pos)| (*id, pos))
    }

    pub fn ids(&self) -> &[ItemId] {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, sort_order: i32) -> ItemRecord {
        ItemRecord {
            id: ItemId(id),
            list_id: ListId(1),
            label: format!("item {id}"),
            quantity: 1,
            checked: false,
            sort_order,
        }
    }

    fn ids(raw: &[i64]) -> Vec<ItemId> {
        raw.iter().copied().map(ItemId).collect()
    }

    #[test]
    fn new_item_defaults_quantity() {
        let it = NewItem::new(Some("Socks"), None).unwrap();
        assert_eq!(it.quantity, DEFAULT_QUANTITY);
        assert_eq!(it.label, "Socks");
    }

    #[test]
    fn new_item_rejects_blank_label_and_bad_quantity() {
        assert_eq!(NewItem::new(Some("  "), None), Err(ValidationError::LabelRequired));
        assert_eq!(NewItem::new(None, Some(2)), Err(ValidationError::LabelRequired));
        assert_eq!(
            NewItem::new(Some("x"), Some(0)),
            Err(ValidationError::QuantityTooSmall(0))
        );
        assert!(matches!(
            NewItem::new(Some("x"), Some(i64::from(i32::MAX) + 1)),
            Err(ValidationError::QuantityTooLarge(_))
        ));
    }

    #[test]
    fn empty_patch_is_rejected() {
        assert_eq!(ItemPatch::new(None, None, None), Err(ValidationError::EmptyPatch));
    }

    #[test]
    fn quantity_patch_leaves_checked_alone() {
        let mut it = item(1, 0);
        it.checked = true;
        ItemPatch::new(None, Some(4), None).unwrap().apply(&mut it);
        assert_eq!(it.quantity, 4);
        assert!(it.checked);
    }

    #[test]
    fn checked_patch_leaves_quantity_alone() {
        let mut it = item(1, 0);
        it.quantity = 3;
        ItemPatch::new(Some(true), None, None).unwrap().apply(&mut it);
        assert!(it.checked);
        assert_eq!(it.quantity, 3);
    }

    #[test]
    fn label_patch_is_trimmed() {
        let mut it = item(1, 0);
        ItemPatch::new(None, None, Some("  Hat ")).unwrap().apply(&mut it);
        assert_eq!(it.label, "Hat");
        assert_eq!(
            ItemPatch::new(None, None, Some(" ")),
            Err(ValidationError::LabelRequired)
        );
    }

    #[test]
    fn items_order_by_sort_order_then_id() {
        let mut items = vec![item(3, 1), item(1, 2), item(2, 1), item(4, 0)];
        items.sort_by(display_order);
        let got: Vec<i64> = items.iter().map(|i| i.id.0).collect();
        assert_eq!(got, vec![4, 2, 3, 1]);
    }

    #[test]
    fn reorder_plan_assigns_positions() {
        let plan = ReorderPlan::new(&ids(&[1, 2, 3]), &ids(&[3, 1, 2])).unwrap();
        let got: Vec<(i64, i32)> = plan.positions().map(|(id, p)| (id.0, p)).collect();
        assert_eq!(got, vec![(3, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn reorder_plan_rejects_foreign_duplicate_and_missing_ids() {
        let current = ids(&[1, 2, 3]);
        assert_eq!(
            ReorderPlan::new(&current, &ids(&[1, 2, 9])),
            Err(ValidationError::UnknownItem(ItemId(9)))
        );
        assert_eq!(
            ReorderPlan::new(&current, &ids(&[1, 1, 2])),
            Err(ValidationError::DuplicateItem(ItemId(1)))
        );
        assert_eq!(
            ReorderPlan::new(&current, &ids(&[2, 1])),
            Err(ValidationError::IncompleteOrder { given: 2, expected: 3 })
        );
    }

    #[test]
    fn reorder_of_empty_list_is_empty_plan() {
        let plan = ReorderPlan::new(&[], &[]).unwrap();
        assert!(plan.ids().is_empty());
    }
}
