pub mod chat;
pub mod charts;
pub mod layout;
pub mod widgets;
