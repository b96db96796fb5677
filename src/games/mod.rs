pub mod chairs;

pub mod dummy;
