pub mod protected;
pub mod status;
pub mod test_users;
