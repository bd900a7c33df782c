pub mod create_account;
pub mod delete_account;
pub mod get_account;
pub mod list_accounts;
pub mod update_account;
