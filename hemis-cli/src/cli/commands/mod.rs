pub mod inspect;
pub mod upload;
