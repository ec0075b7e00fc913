pub mod category;
pub mod session;
