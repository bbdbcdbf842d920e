pub mod components;
pub mod export;
pub mod icons;
