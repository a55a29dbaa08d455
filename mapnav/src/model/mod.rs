pub mod location;
pub mod provider;
pub mod search;
pub mod view;
