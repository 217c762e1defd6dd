//! # In-Memory Store
//!
//! Lists and items in `BTreeMap`s behind one `parking_lot::RwLock`. The lock
//! is never held across an `.await`, so every method is synchronous. Each
//! write takes the lock once, which makes copy and reorder atomic.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use checklist_core::{
    copy_name, item, list, ItemId, ItemPatch, ItemRecord, ListDraft, ListId, ListRecord, NewItem,
    ReorderPlan,
};

use super::StoreError;

#[derive(Debug, Default)]
struct Tables {
    lists: BTreeMap<ListId, ListRecord>,
    items: BTreeMap<ItemId, ItemRecord>,
    last_list_id: i64,
    last_item_id: i64,
}

impl Tables {
    fn next_list_id(&mut self) -> ListId {
        self.last_list_id += 1;
        ListId(self.last_list_id)
    }

    fn next_item_id(&mut self) -> ItemId {
        self.last_item_id += 1;
        ItemId(self.last_item_id)
    }

    fn items_of(&self, list_id: ListId) -> Vec<ItemRecord> {
        let mut items: Vec<ItemRecord> = self
            .items
            .values()
            .filter(|it| it.list_id == list_id)
            .cloned()
            .collect();
        items.sort_by(item::display_order);
        items
    }
}

/// Process-local store. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn list_lists(&self) -> Vec<ListRecord> {
        let mut lists: Vec<ListRecord> = self.tables.read().lists.values().cloned().collect();
        lists.sort_by(list::display_order);
        lists
    }

    pub fn get_list(&self, id: ListId) -> Result<ListRecord, StoreError> {
        self.tables
            .read()
            .lists
            .get(&id)
            .cloned()
            .ok_or(StoreError::ListNotFound(id))
    }

    pub fn create_list(&self, draft: &ListDraft) -> ListRecord {
        let mut tables = self.tables.write();
        let id = tables.next_list_id();
        let record = ListRecord::from_draft(id, draft);
        tables.lists.insert(id, record.clone());
        record
    }

    pub fn update_list(&self, id: ListId, draft: &ListDraft) -> Result<ListRecord, StoreError> {
        let mut tables = self.tables.write();
        let record = tables.lists.get_mut(&id).ok_or(StoreError::ListNotFound(id))?;
        record.replace_with(draft);
        Ok(record.clone())
    }

    /// Remove the list and cascade to its items.
    pub fn delete_list(&self, id: ListId) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        tables.lists.remove(&id).ok_or(StoreError::ListNotFound(id))?;
        tables.items.retain(|_, it| it.list_id != id);
        Ok(())
    }

    pub fn copy_list(&self, id: ListId) -> Result<ListRecord, StoreError> {
        let mut tables = self.tables.write();
        let source = tables.lists.get(&id).cloned().ok_or(StoreError::ListNotFound(id))?;

        let copy_id = tables.next_list_id();
        let copy = ListRecord {
            id: copy_id,
            name: copy_name(&source.name),
            ..source
        };
        tables.lists.insert(copy_id, copy.clone());

        for original in tables.items_of(id) {
            let item_id = tables.next_item_id();
            tables.items.insert(
                item_id,
                ItemRecord {
                    id: item_id,
                    list_id: copy_id,
                    ..original
                },
            );
        }
        Ok(copy)
    }

    pub fn list_items(&self, list_id: ListId) -> Vec<ItemRecord> {
        self.tables.read().items_of(list_id)
    }

    pub fn create_item(&self, list_id: ListId, new: &NewItem) -> Result<ItemRecord, StoreError> {
        let mut tables = self.tables.write();
        if !tables.lists.contains_key(&list_id) {
            return Err(StoreError::ListNotFound(list_id));
        }
        let sort_order = tables
            .items
            .values()
            .filter(|it| it.list_id == list_id)
            .map(|it| it.sort_order + 1)
            .max()
            .unwrap_or(0);
        let id = tables.next_item_id();
        let record = ItemRecord {
            id,
            list_id,
            label: new.label.clone(),
            quantity: new.quantity,
            checked: false,
            sort_order,
        };
        tables.items.insert(id, record.clone());
        Ok(record)
    }

    pub fn update_item(&self, id: ItemId, patch: &ItemPatch) -> Result<ItemRecord, StoreError> {
        let mut tables = self.tables.write();
        let record = tables.items.get_mut(&id).ok_or(StoreError::ItemNotFound(id))?;
        patch.apply(record);
        Ok(record.clone())
    }

    pub fn delete_item(&self, id: ItemId) -> Result<(), StoreError> {
        self.tables
            .write()
            .items
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::ItemNotFound(id))
    }

    pub fn reorder_items(
        &self,
        list_id: ListId,
        order: &[ItemId],
    ) -> Result<Vec<ItemRecord>, StoreError> {
        let mut tables = self.tables.write();
        if !tables.lists.contains_key(&list_id) {
            return Err(StoreError::ListNotFound(list_id));
        }
        let current: Vec<ItemId> = tables.items_of(list_id).iter().map(|it| it.id).collect();
        let plan = ReorderPlan::new(&current, order)?;
        for (id, pos) in plan.positions() {
            if let Some(record) = tables.items.get_mut(&id) {
                record.sort_order = pos;
            }
        }
        Ok(tables.items_of(list_id))
    }
}
