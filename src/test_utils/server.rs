use axum_test::{TestRequest, TestServer};
use uuid::Uuid;

use crate::{
    AppState, MemStorage,
    auth::{USER_ID_HEADER, UserId},
    card::{CardType, CreditCard, NewCard},
    category::{Category, NewCategory},
    family_member::{FamilyMember, NewFamilyMember, Relationship},
    routing::build_router,
    stores::{CardStore, CategoryStore, FamilyMemberStore},
    transaction::TransactionType,
};

/// A test server backed by an in-memory store, acting as a single user.
pub(crate) struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub user_id: UserId,
}

pub(crate) fn get_test_app() -> TestApp {
    let state = AppState::new(MemStorage::new());
    let server =
        TestServer::try_new(build_router(state.clone())).expect("Could not create test server.");

    TestApp {
        server,
        state,
        user_id: Uuid::new_v4(),
    }
}

impl TestApp {
    pub fn get(&self, path: &str) -> TestRequest {
        self.authorize(self.server.get(path))
    }

    pub fn post(&self, path: &str) -> TestRequest {
        self.authorize(self.server.post(path))
    }

    pub fn put(&self, path: &str) -> TestRequest {
        self.authorize(self.server.put(path))
    }

    pub fn delete(&self, path: &str) -> TestRequest {
        self.authorize(self.server.delete(path))
    }

    fn authorize(&self, request: TestRequest) -> TestRequest {
        request.add_header(USER_ID_HEADER, self.user_id.to_string())
    }

    #[track_caller]
    pub fn create_category(&self, name: &str, category_type: TransactionType) -> Category {
        self.state
            .store
            .create_category(
                self.user_id,
                NewCategory {
                    name: name.to_owned(),
                    category_type,
                    color: "#22C55E".to_owned(),
                    icon: None,
                },
            )
            .expect("Could not create test category")
    }

    #[track_caller]
    pub fn create_card(&self, name: &str) -> CreditCard {
        self.state
            .store
            .create_card(
                self.user_id,
                NewCard {
                    name: name.to_owned(),
                    last_four_digits: "1234".to_owned(),
                    card_type: CardType::Physical,
                    holder: "Ana".to_owned(),
                    purpose: "Compras".to_owned(),
                    color: "#1E40AF".to_owned(),
                    limit: Some(5000.0),
                    closing_day: Some(5),
                    due_day: Some(15),
                },
            )
            .expect("Could not create test card")
    }

    #[track_caller]
    pub fn create_family_member(&self, name: &str) -> FamilyMember {
        self.state
            .store
            .create_family_member(
                self.user_id,
                NewFamilyMember {
                    name: name.to_owned(),
                    relationship: Relationship::Conjuge,
                },
            )
            .expect("Could not create test family member")
    }
}
