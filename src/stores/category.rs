//! Defines the category store trait.

use crate::{
    Error,
    auth::UserId,
    category::{Category, CategoryId, CategoryUpdate, NewCategory},
};

/// Creates and retrieves transaction categories.
pub trait CategoryStore {
    /// Get all of the user's categories, sorted by name.
    fn get_all_categories(&self, user_id: UserId) -> Result<Vec<Category>, Error>;

    /// Get a category by its ID, or `None` if the user has no such category.
    fn get_category(&self, user_id: UserId, id: CategoryId) -> Result<Option<Category>, Error>;

    /// Create a new category and add it the store.
    fn create_category(&self, user_id: UserId, category: NewCategory) -> Result<Category, Error>;

    /// Apply `update` to the category with `id`, `None` if there is no such category.
    fn update_category(
        &self,
        user_id: UserId,
        id: CategoryId,
        update: &CategoryUpdate,
    ) -> Result<Option<Category>, Error>;

    /// Delete a category, returns whether a category was deleted.
    fn delete_category(&self, user_id: UserId, id: CategoryId) -> Result<bool, Error>;
}
