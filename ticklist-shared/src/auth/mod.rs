/// Authentication primitives
///
/// - `password`: Argon2id password hashing and verification
/// - `session`: signed session tokens carrying the authenticated identity
/// - `middleware`: the `AuthContext` injected into authenticated requests

pub mod middleware;
pub mod password;
pub mod session;
