pub mod check;
pub mod contact;
pub mod content;
pub mod context;
pub mod metadata;
pub mod render;
pub mod report;
