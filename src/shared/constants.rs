/// Login name that grants admin privilege when combined with the shared
/// admin secret. Compared case-insensitively.
pub const ADMIN_NAME: &str = "admin";

/// Prefix for generated anonymous display names (e.g. "guest-1a2b3c4d").
pub const GUEST_NAME_PREFIX: &str = "guest";
