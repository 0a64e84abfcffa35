pub mod canonicalizer;
pub mod fingerprint;
