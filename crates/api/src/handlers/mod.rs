pub mod flows;
pub mod sessions;
