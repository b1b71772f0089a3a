//! Item storage: the cargo catalog.

use rusqlite::Row;
use uuid::Uuid;

use crate::model::{Item, Weight};

use super::{
    ItemStore, Result, Storage, StorageError, mover::is_unique_violation, parse_id,
    parse_timestamp,
};

/// Most ids bound into one `IN (...)` lookup.
const FIND_CHUNK: usize = 500;

impl ItemStore for Storage {
    fn insert_item(&self, item: &Item) -> Result<()> {
        let conn = self.open()?;
        let result = conn.execute(
            "INSERT INTO items (id, name, weight, created_at) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                item.id.to_string(),
                &item.name,
                item.weight.get(),
                item.created_at.to_string(),
            ],
        );
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(StorageError::ItemAlreadyExists(item.id)),
            Err(e) => Err(e.into()),
        }
    }

    fn find_items(&self, ids: &[Uuid]) -> Result<Vec<Item>> {
        let conn = self.open()?;
        let mut items = Vec::new();
        // Stay well under SQLite's bound-variable limit.
        for chunk in ids.chunks(FIND_CHUNK) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let mut stmt = conn.prepare(&format!(
                "SELECT id, name, weight, created_at FROM items WHERE id IN ({placeholders})"
            ))?;
            let rows = stmt.query_map(
                rusqlite::params_from_iter(chunk.iter().map(Uuid::to_string)),
                read_item,
            )?;
            items.extend(collect_items(rows)?);
        }
        Ok(items)
    }

    fn list_items(&self) -> Result<Vec<Item>> {
        let conn = self.open()?;
        let mut stmt =
            conn.prepare("SELECT id, name, weight, created_at FROM items ORDER BY rowid ASC")?;
        let rows = stmt.query_map([], read_item)?;
        collect_items(rows)
    }

    fn clear_items(&self) -> Result<usize> {
        let conn = self.open()?;
        Ok(conn.execute("DELETE FROM items", [])?)
    }
}

type RawItem = (String, String, f64, String);

fn read_item(row: &Row<'_>) -> rusqlite::Result<RawItem> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn collect_items(rows: impl Iterator<Item = rusqlite::Result<RawItem>>) -> Result<Vec<Item>> {
    let mut items = Vec::new();
    for row in rows {
        let (id, name, weight, created_at) = row?;
        let weight = Weight::try_from(weight)
            .map_err(|e| StorageError::Corrupt(format!("invalid item weight: {e}")))?;
        items.push(Item {
            id: parse_id(&id, "item id")?,
            name,
            weight,
            created_at: parse_timestamp(&created_at, "created_at")?,
        });
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("fleet.sqlite")).unwrap();
        (dir, storage)
    }

    fn sample_item(name: &str, weight: f64) -> Item {
        Item::new(name, Weight::try_from(weight).unwrap())
    }

    #[test]
    fn insert_and_list_items_in_creation_order() {
        let (_dir, storage) = test_storage();
        let ring = sample_item("Ring", 0.1);
        let sword = sample_item("Sword", 3.0);

        storage.insert_item(&ring).unwrap();
        storage.insert_item(&sword).unwrap();

        assert_eq!(storage.list_items().unwrap(), vec![ring, sword]);
    }

    #[test]
    fn insert_duplicate_item_fails() {
        let (_dir, storage) = test_storage();
        let ring = sample_item("Ring", 0.1);

        storage.insert_item(&ring).unwrap();
        let err = storage.insert_item(&ring).unwrap_err();

        assert!(matches!(err, StorageError::ItemAlreadyExists(_)));
    }

    #[test]
    fn find_items_skips_unknown_ids() {
        let (_dir, storage) = test_storage();
        let ring = sample_item("Ring", 0.1);
        let sword = sample_item("Sword", 3.0);
        storage.insert_item(&ring).unwrap();
        storage.insert_item(&sword).unwrap();

        let found = storage.find_items(&[sword.id, Uuid::new_v4()]).unwrap();

        assert_eq!(found, vec![sword]);
    }

    #[test]
    fn find_items_with_no_ids_is_empty() {
        let (_dir, storage) = test_storage();
        assert!(storage.find_items(&[]).unwrap().is_empty());
    }

    #[test]
    fn find_items_spans_many_lookups() {
        let (_dir, storage) = test_storage();
        let ring = sample_item("Ring", 0.1);
        let sword = sample_item("Sword", 3.0);
        storage.insert_item(&ring).unwrap();
        storage.insert_item(&sword).unwrap();

        let mut ids: Vec<Uuid> = (0..FIND_CHUNK * 3).map(|_| Uuid::new_v4()).collect();
        ids[0] = ring.id;
        ids[FIND_CHUNK * 2 + 7] = sword.id;

        let mut found: Vec<Uuid> = storage
            .find_items(&ids)
            .unwrap()
            .iter()
            .map(|i| i.id)
            .collect();
        found.sort();
        let mut expected = vec![ring.id, sword.id];
        expected.sort();
        assert_eq!(found, expected);
    }

    #[test]
    fn clear_items_reports_count() {
        let (_dir, storage) = test_storage();
        storage.insert_item(&sample_item("Ring", 0.1)).unwrap();

        assert_eq!(storage.clear_items().unwrap(), 1);
        assert!(storage.list_items().unwrap().is_empty());
    }
}
