pub(crate) mod asset;
pub(crate) mod fingerprint;
pub(crate) mod request;
pub(crate) mod stream;
pub(crate) mod style;
pub(crate) mod timeline;
