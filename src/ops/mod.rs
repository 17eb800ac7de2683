pub mod item_ops;
pub mod search;
pub mod view;
