//! Defines the credit card store trait.

use crate::{
    Error,
    auth::UserId,
    card::{CardId, CardUpdate, CreditCard, NewCard},
};

/// Creates and retrieves credit cards.
pub trait CardStore {
    /// Get all of the user's cards, sorted by name.
    fn get_all_cards(&self, user_id: UserId) -> Result<Vec<CreditCard>, Error>;

    fn get_card(&self, user_id: UserId, id: CardId) -> Result<Option<CreditCard>, Error>;

    fn create_card(&self, user_id: UserId, card: NewCard) -> Result<CreditCard, Error>;

    fn update_card(
        &self,
        user_id: UserId,
        id: CardId,
        update: &CardUpdate,
    ) -> Result<Option<CreditCard>, Error>;

    fn delete_card(&self, user_id: UserId, id: CardId) -> Result<bool, Error>;
}
