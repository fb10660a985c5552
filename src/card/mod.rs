//! Credit cards that transactions can be charged to.

mod core;
mod endpoints;

pub use core::{CardId, CardPayload, CardType, CardUpdate, CreditCard, NewCard};
pub use endpoints::{
    create_card_endpoint, delete_card_endpoint, get_card_endpoint, get_cards_endpoint,
    update_card_endpoint,
};
