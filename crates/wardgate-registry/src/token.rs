//! Access token generation for newly admitted clients.

use rand::Rng;

/// Generates a random 32-character lowercase hex string (128 bits).
///
/// The authentication path hands this to the device and stores it with
/// the client via [`ClientList::append`](crate::ClientList::append).
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
