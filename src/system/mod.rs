pub mod opener;
pub mod os;
pub mod signal;
