pub mod museums;
pub mod passport;
