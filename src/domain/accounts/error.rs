#[derive(thiserror::Error, Debug)]
pub enum AccountError {
    #[error("no fields provided for update")]
    NoFieldsProvided,
    #[error("account with id {0} not found")]
    NotFound(i32),
    #[error("account number {0} already exists")]
    ConstraintViolation(i64),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
