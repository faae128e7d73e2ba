//! UI components

pub mod header;
pub mod restaurant_card;
pub mod search_form;
pub mod theme;
