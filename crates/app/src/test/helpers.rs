//! Test Helpers

use rust_decimal::Decimal;

use crate::domain::{
    products::{data::NewProduct, records::Category},
    users::{data::NewUser, records::Role},
};

/// Password used by every account built with [`new_user`].
pub(crate) const TEST_PASSWORD: &str = "correct-horse";

pub(crate) fn new_user(email: &str, role: Role) -> NewUser {
    NewUser {
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        first_name: "Test".to_string(),
        last_name: match role {
            Role::Buyer => "Buyer".to_string(),
            Role::Seller => "Seller".to_string(),
        },
        role,
        gender: None,
        location: None,
    }
}

pub(crate) fn new_product(name: &str, price: Decimal) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        company: "Test Bakery".to_string(),
        description: None,
        image: None,
        price,
        category: Category::Bakery,
        free_shipping: false,
        quantity: 10,
        colors: Vec::new(),
    }
}

