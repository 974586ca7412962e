// src/aliases.rs
//! secure-gate wrappers for the secret material a case handles
//!
//! Everything here zeroizes on drop. Access goes through `expose_secret()`.

pub use secure_gate::dynamic_alias;

dynamic_alias!(SymmetricKey, Vec<u8>); // AES-128/192/256 key bytes
dynamic_alias!(InitVector, Vec<u8>); // CBC IV
dynamic_alias!(HmacKey, Vec<u8>); // any length, empty allowed
dynamic_alias!(Passphrase, String); // PBKDF2 password
