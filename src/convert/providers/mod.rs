// Individual provider profiles
pub mod sprint;
pub mod tmobile;
pub mod vodafone;
