mod delete_by_key;
pub use delete_by_key::DeleteByKey;

mod get_by_key;
pub use get_by_key::GetByKey;

mod insert;
pub use insert::Insert;

mod update_by_key;
pub use update_by_key::UpdateByKey;

#[derive(Debug)]
pub enum Operation {
    /// Create a new record
    Insert(Insert),

    /// Delete a record identified by its primary key
    DeleteByKey(DeleteByKey),

    /// Get a record by its primary key
    GetByKey(GetByKey),

    /// Update a record by its primary key
    UpdateByKey(UpdateByKey),
}
