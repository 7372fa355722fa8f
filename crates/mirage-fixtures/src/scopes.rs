///
/// Scope names
///
/// Named capability groupings referenced by permission shorthand.
///

pub const ADMIN: &str = "admin";
pub const ACCOUNT: &str = "account";
