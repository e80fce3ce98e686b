#[allow(non_snake_case)]
pub mod Chemkin;
#[allow(non_snake_case)]
pub mod Cti;
#[allow(non_snake_case)]
pub mod Utils;
